//! Error taxonomy shared by the client and the console core.
//!
//! `FetchError` blocks a list view until the next successful fetch.
//! `MutationError` is a transient, dismissible notice: either the capability
//! check failed client-side (`Permission`, never reaches the backend) or the
//! backend rejected / was unreachable (`Request`). Enrichment failures are
//! recovered locally and have no type here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error body returned by every mutation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub msg: String,
}

/// Failure while retrieving a list page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("backend rejected list request ({status}): {msg}")]
    Rejected { status: u16, msg: String },
    #[error("list request failed: {0}")]
    Transport(String),
}

/// Failure of a mutation that reached (or tried to reach) the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("{msg}")]
    Rejected { status: u16, msg: String },
    #[error("request failed: {0}")]
    Transport(String),
}

/// Failure of a gateway mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// The session lacks the capability; the backend was never contacted.
    #[error("not permitted: {0}")]
    Permission(String),
    #[error(transparent)]
    Request(#[from] RequestError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_decoding() {
        let body: ErrorBody = serde_json::from_str(r#"{"msg": "Case not found"}"#).unwrap();
        assert_eq!(body.msg, "Case not found");
    }

    #[test]
    fn test_request_error_display_is_server_message() {
        let err = RequestError::Rejected {
            status: 403,
            msg: "Not allowed".to_string(),
        };
        assert_eq!(err.to_string(), "Not allowed");
    }

    #[test]
    fn test_mutation_error_wraps_request_error() {
        let err: MutationError = RequestError::Transport("connection refused".to_string()).into();
        assert!(matches!(err, MutationError::Request(_)));
    }
}
