use thiserror::Error;

/// Error taxonomy shared across revdiff crates.
///
/// Crate-local error enums convert into this type at the boundaries where a
/// failure is recorded in an [`Outcome`](crate::Outcome).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RevisionError {
    /// The remote host could not be reached or answered with a non-success status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The requested path does not exist at the requested revision.
    #[error("not found: {path} at {revision}")]
    NotFound { path: String, revision: String },

    /// A remote response did not have the expected shape.
    #[error("format error: {0}")]
    Format(String),

    /// File content is not valid JSON (or not a JSON object).
    #[error("parse error: {0}")]
    Parse(String),

    /// A revision identifier or path is malformed.
    #[error("validation error: {0}")]
    Validation(String),
}

impl RevisionError {
    /// Short machine-friendly name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::NotFound { .. } => "not-found",
            Self::Format(_) => "format",
            Self::Parse(_) => "parse",
            Self::Validation(_) => "validation",
        }
    }
}
