//! HTTP wire contract shared by the server and every client.
//!
//! `POST /search` takes a [`SearchRequest`] and answers with a
//! [`SearchResponse`] whose hits are already in rank order. Any non-2xx answer
//! carries an [`ErrorBody`].

use serde::{Deserialize, Serialize};

/// Path of the search endpoint.
pub const SEARCH_PATH: &str = "/search";

/// Path of the status endpoint.
pub const STATUS_PATH: &str = "/status";

/// Body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Maximum number of hits; the server default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// A ranked hit: the document identifier and its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub score: f32,
}

/// Successful answer to `POST /search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Answer to `GET /status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Number of indexed documents.
    pub documents: usize,
    /// Number of distinct terms.
    pub terms: usize,
    /// Whether a background scan is running.
    pub indexing: bool,
    /// Unix timestamp of the last completed scan, 0 if none.
    #[serde(default)]
    pub last_indexed: i64,
    #[serde(default)]
    pub version: String,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl SearchHit {
    pub fn new(id: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}
