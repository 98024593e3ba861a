//! CLI error types.

use thiserror::Error;

/// Result type for CLI operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An event failed to decode or encode.
    #[error("event error: {0}")]
    Event(#[from] roomkit_core::Error),

    #[error("logging setup failed: {0}")]
    Tracing(#[from] roomkit_core::TracingError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
