//! Library surface of the `kbseed` binary.
//!
//! The workflow is a straight line: resolve the index host, embed the
//! article, upsert it, then run the verification queries. Everything here is
//! exposed so integration tests can drive the pipeline against mock servers.

pub mod article;
pub mod verify;
pub mod workflow;
