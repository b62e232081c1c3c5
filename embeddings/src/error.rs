//! Error types for the embedding client.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur while generating embeddings.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// No API key available for the provider.
    #[error("embedding provider not configured: {0}")]
    ProviderNotConfigured(String),

    /// The API returned a non-success status.
    #[error("embedding API returned {status}: {body}")]
    ApiRequest { status: u16, body: String },

    /// The API returned a success status but the body did not have the
    /// expected shape.
    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Transport-level failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
