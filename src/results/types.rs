//! Result type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Placeholder used for fields the provider left out
pub const NOT_AVAILABLE: &str = "N/A";

/// A single organic result as returned by the provider
///
/// Every field is optional; the provider is free to omit any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl RawResult {
    /// Create a result with all three fields present
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            link: Some(link.into()),
            snippet: Some(snippet.into()),
        }
    }

    /// Result title, or `N/A`
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Result link, or `N/A`
    pub fn link(&self) -> &str {
        self.link.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Result snippet, or `N/A`
    pub fn snippet(&self) -> &str {
        self.snippet.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// A parsed result representing one possible outreach target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Display name taken from the result title
    pub name: String,
    /// `"<Month> <Year>"` the profile matched on
    pub started: String,
    /// Profile URL, also the deduplication key
    pub link: String,
    /// Snippet text shown next to the profile
    pub snippet: String,
    /// Extracted email addresses (only when contact extraction is on)
    #[serde(default)]
    pub emails: Option<BTreeSet<String>>,
    /// Extracted phone numbers (only when contact extraction is on)
    #[serde(default)]
    pub phones: Option<BTreeSet<String>>,
    /// Personalized connection note
    #[serde(default)]
    pub note: Option<String>,
}

/// Classification of a failed provider call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EngineError {
    Timeout,
    NetworkError,
    HttpError(u16),
    TooManyRequests,
    AccessDenied,
    ProviderError,
    ParseError,
    Unknown,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "Request timed out"),
            Self::NetworkError => write!(f, "Network error"),
            Self::HttpError(code) => write!(f, "HTTP error: {}", code),
            Self::TooManyRequests => write!(f, "Too many requests"),
            Self::AccessDenied => write!(f, "Access denied"),
            Self::ProviderError => write!(f, "Provider error"),
            Self::ParseError => write!(f, "Failed to parse response"),
            Self::Unknown => write!(f, "Unknown error"),
        }
    }
}

/// A month whose provider call failed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthFailure {
    /// `"<Month> <Year>"` label of the failed search
    pub month: String,
    pub error: EngineError,
    /// Underlying error message for the operator
    pub message: String,
}

impl std::fmt::Display for MonthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Error searching for {}: {} ({})",
            self.month, self.error, self.message
        )
    }
}

/// Provider response timing for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthTiming {
    pub month: String,
    /// Response time in milliseconds
    pub time_ms: u64,
    /// Number of raw results returned
    pub result_count: usize,
}
