//! # Vector Index
//!
//! Client for a hosted vector-index service with a Pinecone-style REST API.
//!
//! Covers the three calls the seeding workflow needs:
//!
//! - **Host resolution**: look up an index's data-plane host by name on the
//!   control plane.
//! - **Upsert**: insert-or-overwrite one vector record keyed by id.
//! - **Query**: filtered top-k similarity search returning scored matches.
//!
//! All state lives in the remote service; this crate holds nothing between
//! calls.

pub mod client;
pub mod error;
pub mod types;

pub use client::{IndexClient, IndexClientBuilder};
pub use error::{IndexError, Result};
pub use types::{MetadataFilter, QueryMatch, VectorMetadata, VectorRecord};
