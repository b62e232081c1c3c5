//! Wire types shared between the upsert and query paths.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Metadata stored alongside a vector.
///
/// These are the KB entry fields the index returns with every match, so a
/// top-1 hit carries everything needed to display the article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMetadata {
    /// Source tag used for metadata filtering (e.g. `kb_article`).
    pub source: String,

    /// Human-readable article title.
    pub title: String,

    /// Full article text.
    pub text: String,
}

/// One record as the upsert endpoint expects it.
///
/// The id is caller-assigned and stable across runs; re-upserting under the
/// same id replaces the prior record rather than duplicating it.
#[derive(Debug, Clone, Serialize)]
pub struct VectorRecord {
    /// Unique, caller-assigned identifier.
    pub id: String,

    /// The embedding vector.
    pub values: Vec<f32>,

    /// Stored metadata.
    pub metadata: VectorMetadata,
}

/// A scored match returned by a similarity query.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryMatch {
    /// Identifier of the matched record.
    pub id: String,

    /// Similarity score; higher is more similar.
    pub score: f32,

    /// Stored metadata, present when the query asked for it.
    pub metadata: Option<VectorMetadata>,
}

/// Equality filter on a single metadata field.
///
/// Serializes to the service's filter syntax: `{"field": {"$eq": "value"}}`.
#[derive(Debug, Clone)]
pub struct MetadataFilter {
    field: String,
    value: String,
}

impl MetadataFilter {
    /// Match records whose `field` equals `value`.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl Serialize for MetadataFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &serde_json::json!({ "$eq": self.value }))?;
        map.end()
    }
}
