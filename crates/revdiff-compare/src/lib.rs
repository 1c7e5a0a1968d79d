//! Revision comparison engine for revdiff.
//!
//! Drives a full comparison run: list the files changed between two
//! revisions, keep the JSON ones, fetch each at both revisions, diff them,
//! and aggregate everything into one [`Outcome`]. Per-file failures are
//! recorded as errors on that outcome and never abort the run.

pub mod cancel;
pub mod comparator;
pub mod comparison;
pub mod error;
pub mod options;
pub mod snapshot;

pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use comparator::Comparator;
pub use comparison::{ComparisonRun, FileComparison, RunSummary};
pub use error::{CompareError, CompareResult};
pub use options::CompareOptions;
pub use snapshot::SnapshotWriter;

// Re-export key types
pub use revdiff_diff::{DiffEntry, DiffKind, DiffMode, DiffOptions, DiffReport};
pub use revdiff_remote::{HttpGateway, InMemoryGateway, RemoteConfig, RevisionGateway};
pub use revdiff_types::{ChangedFile, Outcome, Revision, RevisionError, Status};
