use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod config;
mod logging;
mod output;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);
    commands::run_command(cli).await
}
