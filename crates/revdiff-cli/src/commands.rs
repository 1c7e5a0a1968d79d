use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use revdiff_compare::{cancel_pair, CancelHandle, Comparator, RunSummary};
use revdiff_diff::{diff_documents_with, parse_document, DiffOptions, DiffReport};
use revdiff_remote::{HttpGateway, RevisionGateway};
use revdiff_types::{Outcome, Revision};
use tracing::{debug, warn};

use crate::cli::*;
use crate::config::FileConfig;
use crate::output;

pub async fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let file_config = FileConfig::load_optional(cli.config.as_deref())?;
    match cli.command {
        Command::Compare(args) => cmd_compare(args, &file_config, &cli.format).await,
        Command::List(args) => cmd_list(args, &file_config, &cli.format).await,
        Command::Diff(args) => cmd_diff(args, &cli.format),
    }
}

fn exit_code(clean: bool) -> ExitCode {
    if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Cancel the run on the first Ctrl-C.
fn cancel_on_interrupt(handle: CancelHandle) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling remaining files");
            handle.cancel();
        }
    });
}

async fn cmd_compare(
    args: CompareArgs,
    file_config: &FileConfig,
    format: &OutputFormat,
) -> anyhow::Result<ExitCode> {
    let remote = file_config.resolve_remote(&args.remote)?;
    debug!(
        base_url = %remote.base_url,
        project = %remote.project,
        repository = %remote.repository,
        auth = remote.auth.display_name(),
        "resolved remote"
    );
    let gateway = HttpGateway::new(remote)?;

    let (handle, signal) = cancel_pair();
    cancel_on_interrupt(handle);
    let options = file_config.resolve_compare(&args, signal);
    let comparator = Comparator::with_options(Arc::new(gateway), options);

    let outcome = comparator.compare_revision_ids(&args.from, &args.to).await;
    let summary = RunSummary::from_outcome(&outcome);
    match format {
        OutputFormat::Json => output::print_json(&outcome)?,
        OutputFormat::Text => output::print_lines(&output::run_lines(&outcome)),
    }
    Ok(exit_code(summary.is_clean()))
}

async fn cmd_list(
    args: ListArgs,
    file_config: &FileConfig,
    format: &OutputFormat,
) -> anyhow::Result<ExitCode> {
    let remote = file_config.resolve_remote(&args.remote)?;
    let gateway = HttpGateway::new(remote)?;
    let from = Revision::new(args.from)?;
    let to = Revision::new(args.to)?;

    let files = gateway
        .list_changed_files(&from, &to)
        .await
        .with_context(|| format!("listing changes between {from} and {to}"))?;
    match format {
        OutputFormat::Json => output::print_json(&files)?,
        OutputFormat::Text => {
            for file in &files {
                let marker = if file.is_json() { "json".cyan() } else { "    ".normal() };
                println!("{marker} {file}");
            }
            println!("{} changed file(s)", files.len().to_string().bold());
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_diff(args: DiffArgs, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let options = if args.recursive {
        DiffOptions::recursive()
    } else {
        DiffOptions::default()
    };
    let outcome = Outcome::from_result(diff_files(&args, options).map_err(|e| format!("{e:#}")));
    match format {
        OutputFormat::Json => output::print_json(&outcome)?,
        OutputFormat::Text => output::print_lines(&output::document_lines(&outcome)),
    }
    Ok(exit_code(outcome.is_success()))
}

fn diff_files(args: &DiffArgs, options: DiffOptions) -> anyhow::Result<DiffReport> {
    let old = std::fs::read(&args.old)
        .with_context(|| format!("cannot read {}", args.old.display()))?;
    let new = std::fs::read(&args.new)
        .with_context(|| format!("cannot read {}", args.new.display()))?;
    let old = parse_document(&old).with_context(|| format!("in {}", args.old.display()))?;
    let new = parse_document(&new).with_context(|| format!("in {}", args.new.display()))?;
    Ok(diff_documents_with(&old, &new, options)?)
}
