//! How a search request reaches the server.

use crate::ClientError;
use quarry_core::config::ClientConfig;
use quarry_core::protocol::{
    ErrorBody, SearchRequest, SearchResponse, StatusReport, SEARCH_PATH, STATUS_PATH,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// A blocking search round trip.
pub trait SearchTransport {
    fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError>;
}

/// [`SearchTransport`] over HTTP.
pub struct SearchClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl SearchClient {
    /// Create a transport for the server at `base_url`.
    ///
    /// Every request is abandoned after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(&config.server_url, Duration::from_millis(config.timeout_ms))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch `GET /status`.
    pub fn status(&self) -> Result<StatusReport, ClientError> {
        let response = self
            .client
            .get(self.endpoint(STATUS_PATH))
            .send()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        decode(response)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl SearchTransport for SearchClient {
    fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        debug!(query = %request.query, "POST {}", SEARCH_PATH);
        let response = self
            .client
            .post(self.endpoint(SEARCH_PATH))
            .json(request)
            .send()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        decode(response)
    }
}

fn decode<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|e| ClientError::Transport(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}
