//! Settings structures for PM-Searcher configuration

use crate::outreach::DEFAULT_TEMPLATE;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the SerpApi key
pub const API_KEY_ENV: &str = "SERPAPI_API_KEY";

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub provider: ProviderSettings,
    pub outreach: OutreachSettings,
    pub cache: CacheSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (PM_SEARCHER_* prefix, plus the API key)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("PM_SEARCHER_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("PM_SEARCHER_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var(API_KEY_ENV) {
            if !val.trim().is_empty() {
                self.provider.api_key = Some(val);
            }
        }
    }

    /// Pick the API key to use: an explicit one first, then the configured one
    ///
    /// Blank keys count as missing.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or_else(|| {
                self.provider
                    .api_key
                    .as_deref()
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
            })
            .map(str::to_string)
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Name shown in the page header
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            instance_name: "PM-Searcher".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8501,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 30.0,
            pool_maxsize: 4,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Search provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// SerpApi endpoint
    pub base_url: String,
    /// SerpApi engine parameter
    pub engine: String,
    /// Result count hint sent with every query
    pub num_results: u32,
    /// API key (usually supplied through SERPAPI_API_KEY instead)
    pub api_key: Option<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://serpapi.com/search.json".to_string(),
            engine: "google".to_string(),
            num_results: 10,
            api_key: None,
        }
    }
}

/// Defaults for the search form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutreachSettings {
    pub default_title: String,
    pub default_company: String,
    pub note_template: String,
    pub extract_contacts: bool,
}

impl Default for OutreachSettings {
    fn default() -> Self {
        Self {
            default_title: "Product Manager".to_string(),
            default_company: "Google".to_string(),
            note_template: DEFAULT_TEMPLATE.to_string(),
            extract_contacts: false,
        }
    }
}

/// Report cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// How long a finished report stays downloadable, in seconds
    pub report_ttl: u64,
    pub max_reports: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            report_ttl: 1800,
            max_reports: 100,
        }
    }
}
