//! Error types for the sync module.

use thiserror::Error;

/// Errors that can occur while building or saving a conversation's groups.
#[derive(Debug, Error)]
pub enum SyncError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// HTTP client configuration error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-success status.
    #[error("Server returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Decoded response body, if any.
        body: Option<serde_json::Value>,
    },

    /// The transport failed without an HTTP response.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// No group with this key exists in the collection.
    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    /// The same group key was supplied twice.
    #[error("Duplicate group key: {0}")]
    DuplicateGroup(String),

    /// Construction input is missing a required value.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SyncError {
    /// Check if a caller could reasonably retry the save.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::HttpRequest(_) | Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Convenience result alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(SyncError::Transport("connection reset".into()).is_retryable());
        assert!(
            SyncError::Status {
                status: 503,
                body: None
            }
            .is_retryable()
        );
        assert!(
            !SyncError::Status {
                status: 400,
                body: None
            }
            .is_retryable()
        );
        assert!(!SyncError::UnknownGroup("group9".into()).is_retryable());
    }

    #[test]
    fn test_status_display() {
        let err = SyncError::Status {
            status: 404,
            body: None,
        };
        assert_eq!(err.to_string(), "Server returned status 404");
    }
}
