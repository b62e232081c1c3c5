//! # Embeddings
//!
//! Client for hosted text-embedding APIs.
//!
//! Turns a text payload into a fixed-length dense vector via an OpenAI-style
//! `/embeddings` endpoint. The vectors themselves live in a remote index
//! (see `kbseed-vector-index`); this crate only produces them.
//!
//! Response bodies are validated before extraction: a 200 with a missing or
//! empty `data` array maps to [`EmbeddingError::InvalidResponse`] rather than
//! a panic deep inside a field access.

pub mod error;
pub mod provider;

pub use error::{EmbeddingError, Result};
pub use provider::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, OpenAIProvider};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension of embeddings produced by the default model.
pub const DEFAULT_DIMENSION: usize = 1536; // text-embedding-3-small
