use revdiff_types::RevisionError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("{path} not found at {revision}")]
    NotFound { path: String, revision: String },

    #[error("unexpected response format: {0}")]
    Format(String),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<RevisionError> for GatewayError {
    fn from(err: RevisionError) -> Self {
        match err {
            RevisionError::Transport(msg) => Self::Transport(msg),
            RevisionError::NotFound { path, revision } => Self::NotFound { path, revision },
            RevisionError::Format(msg) | RevisionError::Parse(msg) => Self::Format(msg),
            RevisionError::Validation(msg) => Self::Validation(msg),
        }
    }
}

impl From<GatewayError> for RevisionError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound { path, revision } => RevisionError::NotFound { path, revision },
            GatewayError::Format(msg) => RevisionError::Format(msg),
            GatewayError::Validation(msg) => RevisionError::Validation(msg),
            other @ (GatewayError::Transport(_)
            | GatewayError::Status { .. }
            | GatewayError::Cancelled) => RevisionError::Transport(other.to_string()),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
