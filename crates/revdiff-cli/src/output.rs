//! Text rendering of run outcomes.

use std::fmt;

use colored::Colorize;
use revdiff_compare::{ComparisonRun, DiffReport, Outcome, RunSummary};
use revdiff_diff::NO_DIFFERENCES;
use serde::Serialize;

/// One line of human-readable output. `Display` gives the plain text;
/// [`ReportLine::print`] adds color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportLine {
    File(String),
    Entry(String),
    Clean,
    Note(String),
    Error(String),
    Summary(String),
}

impl ReportLine {
    pub fn print(&self) {
        match self {
            Self::File(path) => println!("{} {}", "==".dimmed(), path.bold()),
            Self::Entry(text) => println!("  {text}"),
            Self::Clean => println!("  {}", NO_DIFFERENCES.green()),
            Self::Note(text) => println!("{}", text.dimmed()),
            Self::Error(text) => println!("{} {}", "error:".red().bold(), text),
            Self::Summary(text) => println!("{}", text.bold()),
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "== {path}"),
            Self::Entry(text) => write!(f, "  {text}"),
            Self::Clean => write!(f, "  {NO_DIFFERENCES}"),
            Self::Note(text) => write!(f, "{text}"),
            Self::Error(text) => write!(f, "error: {text}"),
            Self::Summary(text) => write!(f, "{text}"),
        }
    }
}

fn report_lines(report: &DiffReport, out: &mut Vec<ReportLine>) {
    if report.has_differences() {
        out.extend(report.render_lines().into_iter().map(ReportLine::Entry));
    } else {
        out.push(ReportLine::Clean);
    }
}

/// Lines for a whole run: each compared file with its entries, then
/// messages, errors and the summary.
pub fn run_lines(outcome: &Outcome<ComparisonRun>) -> Vec<ReportLine> {
    let mut lines = Vec::new();
    if let Some(run) = outcome.data() {
        for file in &run.files {
            lines.push(ReportLine::File(file.path.to_string()));
            report_lines(&file.report, &mut lines);
        }
    }
    lines.extend(outcome.messages().iter().cloned().map(ReportLine::Note));
    lines.extend(outcome.errors().iter().cloned().map(ReportLine::Error));
    lines.push(ReportLine::Summary(RunSummary::from_outcome(outcome).to_string()));
    lines
}

/// Lines for a single document diff.
pub fn document_lines(outcome: &Outcome<DiffReport>) -> Vec<ReportLine> {
    let mut lines = Vec::new();
    if let Some(report) = outcome.data() {
        report_lines(report, &mut lines);
    }
    lines.extend(outcome.errors().iter().cloned().map(ReportLine::Error));
    lines
}

pub fn print_lines(lines: &[ReportLine]) {
    for line in lines {
        line.print();
    }
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
