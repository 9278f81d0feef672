//! Engine traits and types

use crate::results::RawResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters for building a search request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestParams {
    /// Search query string
    pub query: String,
    /// Result count hint
    pub num: u32,
    /// Provider API key
    #[serde(skip_serializing)]
    pub api_key: String,
}

impl RequestParams {
    /// Create new request parameters
    pub fn new(query: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            num: 10,
            api_key: api_key.into(),
        }
    }

    pub fn with_num(mut self, num: u32) -> Self {
        self.num = num;
        self
    }
}

/// HTTP request to be made by the engine
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// URL to request
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: Vec<(String, String)>,
}

impl EngineRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            params: Vec::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// HTTP response from engine request
#[derive(Debug)]
pub struct EngineResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl EngineResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ResponseError> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A search backend that turns a query into an HTTP request and parses the
/// response
pub trait Engine: Send + Sync {
    /// Engine name
    fn name(&self) -> &str;

    /// Number of results asked for when the caller gives no hint
    fn results_per_page(&self) -> u32 {
        10
    }

    /// Build the HTTP request for a search
    fn request(&self, params: &RequestParams) -> anyhow::Result<EngineRequest>;

    /// Parse the HTTP response into organic results
    fn response(&self, response: EngineResponse) -> anyhow::Result<Vec<RawResult>>;
}

/// The black-box search provider the pipeline talks to
///
/// One call per query; no paging, no retries.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name, used in logs
    fn name(&self) -> &str;

    /// Run one query and return the first page of organic results
    async fn search(&self, params: &RequestParams) -> anyhow::Result<Vec<RawResult>>;
}

/// Errors an engine raises while interpreting a response
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// Non-2xx status, with the provider's explanation when the body had one
    #[error("HTTP error: {code}{}", status_detail(.message))]
    Status { code: u16, message: Option<String> },
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

fn status_detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" ({})", m))
        .unwrap_or_default()
}
