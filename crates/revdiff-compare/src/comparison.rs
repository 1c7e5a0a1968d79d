use std::fmt;

use revdiff_diff::DiffReport;
use revdiff_types::{ChangedFile, Outcome, Status};
use serde::Serialize;

/// The diff report of one changed JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileComparison {
    pub path: ChangedFile,
    pub report: DiffReport,
}

/// Data of a comparison run: one entry per successfully compared file, in
/// the order the remote listed them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonRun {
    pub files: Vec<FileComparison>,
    /// Changed files excluded because they are not `.json` files.
    pub skipped: usize,
}

impl ComparisonRun {
    /// Files whose report has at least one entry.
    pub fn with_differences(&self) -> impl Iterator<Item = &FileComparison> {
        self.files.iter().filter(|f| f.report.has_differences())
    }

    pub fn get(&self, path: &str) -> Option<&FileComparison> {
        self.files.iter().find(|f| f.path.path() == path)
    }
}

impl fmt::Display for ComparisonRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s) compared, {} with differences, {} skipped",
            self.files.len(),
            self.with_differences().count(),
            self.skipped
        )
    }
}

/// Counts derived from one run outcome, used for the final report line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub compared: usize,
    pub with_differences: usize,
    pub failed: usize,
    /// The run produced no data at all (changed-file listing failed).
    pub aborted: bool,
}

impl RunSummary {
    pub fn from_outcome(outcome: &Outcome<ComparisonRun>) -> Self {
        match outcome.data() {
            Some(run) => Self {
                compared: run.files.len(),
                with_differences: run.with_differences().count(),
                failed: outcome.errors().len(),
                aborted: false,
            },
            None => Self {
                compared: 0,
                with_differences: 0,
                failed: 0,
                aborted: outcome.status() == Status::Failure,
            },
        }
    }

    /// `true` when every listed JSON file was compared.
    pub fn is_clean(&self) -> bool {
        !self.aborted && self.failed == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.aborted {
            return write!(f, "Comparison failed before any file was compared.");
        }
        if self.with_differences == 0 {
            write!(f, "No differences in any compared file.")?;
        } else {
            write!(f, "Differences found in {} file(s).", self.with_differences)?;
        }
        if self.failed > 0 {
            write!(f, " {} file(s) could not be compared.", self.failed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revdiff_diff::DiffEntry;

    fn comparison(path: &str, entries: Vec<DiffEntry>) -> FileComparison {
        FileComparison {
            path: ChangedFile::new(path).unwrap(),
            report: DiffReport::new(entries),
        }
    }

    fn run() -> ComparisonRun {
        ComparisonRun {
            files: vec![
                comparison("a.json", vec![]),
                comparison("b.json", vec![DiffEntry::added("k", "1")]),
                comparison("c.json", vec![DiffEntry::removed("k", "1")]),
            ],
            skipped: 2,
        }
    }

    #[test]
    fn run_display_and_lookup() {
        let run = run();
        assert_eq!(run.to_string(), "3 file(s) compared, 2 with differences, 2 skipped");
        assert!(run.get("b.json").unwrap().report.has_differences());
        assert!(run.get("missing.json").is_none());
    }

    #[test]
    fn summary_no_differences() {
        let outcome = Outcome::success(ComparisonRun {
            files: vec![comparison("a.json", vec![])],
            skipped: 0,
        });
        let summary = RunSummary::from_outcome(&outcome);
        assert!(summary.is_clean());
        assert_eq!(summary.to_string(), "No differences in any compared file.");
    }

    #[test]
    fn summary_differences_and_failures() {
        let outcome = Outcome::success(run()).with_error("x.json: not found");
        let summary = RunSummary::from_outcome(&outcome);
        assert_eq!(summary.compared, 3);
        assert_eq!(summary.with_differences, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_clean());
        assert_eq!(
            summary.to_string(),
            "Differences found in 2 file(s). 1 file(s) could not be compared."
        );
    }

    #[test]
    fn summary_aborted() {
        let outcome: Outcome<ComparisonRun> = Outcome::failure(["transport error: refused"]);
        let summary = RunSummary::from_outcome(&outcome);
        assert!(summary.aborted);
        assert!(!summary.is_clean());
        assert_eq!(
            summary.to_string(),
            "Comparison failed before any file was compared."
        );
    }
}
