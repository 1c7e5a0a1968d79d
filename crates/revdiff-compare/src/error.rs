use std::time::Duration;

use revdiff_diff::DiffError;
use revdiff_remote::GatewayError;
use revdiff_types::RevisionError;
use thiserror::Error;

/// Why a single file could not be compared.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("fetch at {revision} failed: {source}")]
    Fetch {
        revision: String,
        source: GatewayError,
    },

    #[error("content at {revision} is not valid JSON: {source}")]
    Parse { revision: String, source: DiffError },

    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("cancelled")]
    Cancelled,
}

impl From<CompareError> for RevisionError {
    fn from(err: CompareError) -> Self {
        match err {
            CompareError::Fetch { source, .. } => source.into(),
            parse @ (CompareError::Parse { .. } | CompareError::Diff(_)) => {
                RevisionError::Parse(parse.to_string())
            }
            elapsed @ (CompareError::Timeout(_) | CompareError::Cancelled) => {
                RevisionError::Transport(elapsed.to_string())
            }
        }
    }
}

pub type CompareResult<T> = Result<T, CompareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_not_found_maps_to_not_found() {
        let err = CompareError::Fetch {
            revision: "b".into(),
            source: GatewayError::NotFound {
                path: "x.json".into(),
                revision: "b".into(),
            },
        };
        assert!(matches!(RevisionError::from(err), RevisionError::NotFound { .. }));
    }

    #[test]
    fn cancellation_and_timeout_are_transport_errors() {
        assert_eq!(
            RevisionError::from(CompareError::Cancelled),
            RevisionError::Transport("cancelled".into())
        );
        assert!(matches!(
            RevisionError::from(CompareError::Timeout(Duration::from_millis(5))),
            RevisionError::Transport(_)
        ));
    }

    #[test]
    fn parse_failure_maps_to_parse() {
        let source = revdiff_diff::parse_document(b"{").unwrap_err();
        let err = CompareError::Parse { revision: "a".into(), source };
        assert!(matches!(RevisionError::from(err), RevisionError::Parse(_)));
    }
}
