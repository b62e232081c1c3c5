//! Error types for the vector-index client.

use thiserror::Error;

/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors that can occur while talking to the index service.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The control plane has no index with the requested name.
    #[error("no index named `{name}` in this account")]
    IndexNotFound { name: String },

    /// The service returned a non-success status.
    #[error("index API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The service returned a success status but the body did not have the
    /// expected shape.
    #[error("invalid index response: {0}")]
    InvalidResponse(String),

    /// Transport-level failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
