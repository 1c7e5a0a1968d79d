//! Error types for the diff crate.

use std::fmt;

use revdiff_types::RevisionError;

/// Which of the two compared documents an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Old => write!(f, "old"),
            Self::New => write!(f, "new"),
        }
    }
}

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The document bytes are not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A document's top-level value is not a JSON object.
    #[error("{side} document is not a JSON object (found {found})")]
    NotAnObject { side: Side, found: &'static str },
}

impl From<DiffError> for RevisionError {
    fn from(err: DiffError) -> Self {
        RevisionError::Parse(err.to_string())
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
