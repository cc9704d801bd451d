use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur when talking to the document index
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Index returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Document index unreachable after {attempts} attempts")]
    Unavailable { attempts: u32 },
}

/// One matching document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Absent when the query sorts on fields only
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
}

/// Total hit count plus the ordered hits of one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    pub total: u64,
    pub hits: Vec<Hit>,
}

impl SearchResponse {
    /// Parse a raw `_search` response body
    ///
    /// `hits.total` may be a bare number or `{ "value": n }` depending on the
    /// engine version; a missing total falls back to the page length.
    pub fn from_json(json: &Value) -> Result<Self, IndexError> {
        let hits_section = json
            .get("hits")
            .ok_or_else(|| IndexError::InvalidResponse("Missing hits section".into()))?;

        let raw_hits = hits_section
            .get("hits")
            .and_then(|h| h.as_array())
            .ok_or_else(|| IndexError::InvalidResponse("Missing hits array".into()))?;

        let hits = raw_hits
            .iter()
            .map(|hit| {
                Hit::deserialize(hit)
                    .map_err(|e| IndexError::InvalidResponse(format!("Malformed hit: {}", e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total = hits_section
            .get("total")
            .and_then(|t| t.as_u64().or_else(|| t.get("value").and_then(Value::as_u64)))
            .unwrap_or(hits.len() as u64);

        Ok(Self { total, hits })
    }
}

/// Query/index contract the service needs from the document store
///
/// Each call is a single round trip; retries belong to connection setup only.
#[allow(async_fn_in_trait)]
pub trait DocumentIndex {
    /// Execute a search request body against one index
    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse, IndexError>;

    /// Store a document, returning its id
    async fn index_document(
        &self,
        index: &str,
        id: Option<&str>,
        document: &Value,
    ) -> Result<String, IndexError>;

    /// Whether the index answers at all
    async fn ping(&self) -> bool;
}
