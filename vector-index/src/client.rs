//! HTTP client for the index service.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{IndexError, Result};
use crate::types::{MetadataFilter, QueryMatch, VectorRecord};

/// Default control-plane URL for index listing.
pub const DEFAULT_CONTROL_URL: &str = "https://api.pinecone.io";

/// Client for one account's vector indexes.
///
/// Authenticates with an `Api-Key` header on every call. Data-plane calls
/// take the host returned by [`IndexClient::resolve_host`].
pub struct IndexClient {
    api_key: String,
    control_url: String,
    client: reqwest::Client,
}

impl IndexClient {
    /// Create a builder with the given API key.
    pub fn builder(api_key: impl Into<String>) -> IndexClientBuilder {
        IndexClientBuilder::new(api_key)
    }

    /// Look up the data-plane host for the named index.
    ///
    /// Fails with [`IndexError::IndexNotFound`] when the account has no index
    /// under that name, so callers never proceed with an empty host.
    pub async fn resolve_host(&self, index_name: &str) -> Result<String> {
        debug!("Resolving host for index: {index_name}");

        let response = self
            .client
            .get(format!("{}/indexes", self.control_url))
            .header("Api-Key", &self.api_key)
            .send()
            .await?;

        let listing: IndexListing = parse_success(response).await?;

        let host = listing
            .indexes
            .into_iter()
            .find(|idx| idx.name == index_name)
            .map(|idx| idx.host)
            .ok_or_else(|| IndexError::IndexNotFound {
                name: index_name.to_string(),
            })?;

        info!("Resolved index {index_name} to host {host}");
        Ok(host)
    }

    /// Insert or overwrite one record, keyed by its id.
    ///
    /// Returns the number of vectors the service reports as written.
    pub async fn upsert(&self, host: &str, record: VectorRecord) -> Result<u64> {
        debug!("Upserting vector {} to {host}", record.id);

        let body = UpsertBody {
            vectors: vec![record],
        };

        let response = self
            .client
            .post(data_url(host, "/vectors/upsert"))
            .header("Api-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let result: UpsertResult = parse_success(response).await?;
        let count = result.upserted_count.unwrap_or(1);

        info!("Upserted {count} vector(s)");
        Ok(count)
    }

    /// Top-k similarity search, optionally restricted by a metadata filter.
    ///
    /// Metadata is always requested so matches carry their stored fields.
    pub async fn query(
        &self,
        host: &str,
        vector: &[f32],
        top_k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<QueryMatch>> {
        debug!("Querying {host} with top_k={top_k}");

        let body = QueryBody {
            vector,
            top_k,
            include_metadata: true,
            filter,
        };

        let response = self
            .client
            .post(data_url(host, "/query"))
            .header("Api-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let result: QueryResult = parse_success(response).await?;

        debug!("Query returned {} match(es)", result.matches.len());
        Ok(result.matches)
    }
}

/// Builder for [`IndexClient`].
pub struct IndexClientBuilder {
    api_key: String,
    control_url: String,
    accept_invalid_certs: bool,
}

impl IndexClientBuilder {
    /// Create a builder with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            control_url: DEFAULT_CONTROL_URL.to_string(),
            accept_invalid_certs: false,
        }
    }

    /// Point the client at a different control-plane URL.
    pub fn with_control_url(mut self, url: impl Into<String>) -> Self {
        self.control_url = url.into();
        self
    }

    /// Skip TLS certificate verification. Off unless explicitly requested.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<IndexClient> {
        if self.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for index calls");
        }

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()?;

        Ok(IndexClient {
            api_key: self.api_key,
            control_url: self.control_url,
            client,
        })
    }
}

/// Build a data-plane URL from the host the control plane returned.
///
/// The control plane hands out bare hostnames; local proxies and tests may
/// supply a full URL instead, which is used as-is.
fn data_url(host: &str, path: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{host}{path}")
    } else {
        format!("https://{host}{path}")
    }
}

/// Check the status and parse the body, keeping a malformed success body
/// distinguishable from a transport failure.
async fn parse_success<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(IndexError::Api {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| IndexError::InvalidResponse(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct IndexListing {
    indexes: Vec<IndexDescription>,
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    name: String,
    host: String,
}

#[derive(Debug, Serialize)]
struct UpsertBody {
    vectors: Vec<VectorRecord>,
}

#[derive(Debug, Deserialize)]
struct UpsertResult {
    #[serde(rename = "upsertedCount")]
    upserted_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryBody<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a MetadataFilter>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_data_url_adds_scheme_to_bare_host() {
        assert_eq!(
            data_url("idx-abc123.svc.pinecone.io", "/query"),
            "https://idx-abc123.svc.pinecone.io/query"
        );
    }

    #[test]
    fn test_data_url_keeps_explicit_scheme() {
        assert_eq!(
            data_url("http://127.0.0.1:8080", "/vectors/upsert"),
            "http://127.0.0.1:8080/vectors/upsert"
        );
    }

    #[test]
    fn test_query_body_uses_service_field_names() {
        let filter = MetadataFilter::eq("source", "kb_article");
        let body = QueryBody {
            vector: &[0.5],
            top_k: 3,
            include_metadata: true,
            filter: Some(&filter),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "vector": [0.5],
                "topK": 3,
                "includeMetadata": true,
                "filter": {"source": {"$eq": "kb_article"}},
            })
        );
    }
}
