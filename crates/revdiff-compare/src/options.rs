use std::path::PathBuf;
use std::time::Duration;

use revdiff_diff::DiffOptions;

use crate::cancel::CancelSignal;

/// Tuning for a comparison run.
#[derive(Clone, Debug)]
pub struct CompareOptions {
    /// Maximum number of files compared at once. `1` processes files
    /// sequentially.
    pub concurrency: usize,
    pub diff: DiffOptions,
    /// Upper bound on fetching and diffing one file (both revisions).
    pub file_timeout: Option<Duration>,
    /// When set, every fetched revision is also written below this directory.
    pub snapshot_dir: Option<PathBuf>,
    pub cancel: CancelSignal,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            diff: DiffOptions::default(),
            file_timeout: None,
            snapshot_dir: None,
            cancel: CancelSignal::never(),
        }
    }
}

impl CompareOptions {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_diff(mut self, diff: DiffOptions) -> Self {
        self.diff = diff;
        self
    }

    pub fn with_file_timeout(mut self, timeout: Duration) -> Self {
        self.file_timeout = Some(timeout);
        self
    }

    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = Some(dir.into());
        self
    }

    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }
}
