//! Application state shared across handlers

use crate::cache::ReportCache;
use crate::config::Settings;
use crate::engines::Provider;
use crate::search::SearchPipeline;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search pipeline
    pub pipeline: Arc<SearchPipeline>,
    /// Finished reports available for download
    pub reports: ReportCache,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, provider: Arc<dyn Provider>) -> anyhow::Result<Self> {
        let pipeline = SearchPipeline::new(provider).with_num_results(settings.provider.num_results);
        let reports = ReportCache::with_settings(&settings.cache);
        let templates = Arc::new(super::Templates::new()?);

        Ok(Self {
            settings: Arc::new(settings),
            pipeline: Arc::new(pipeline),
            reports,
            templates,
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }

    /// Whether an API key is available without the user typing one
    pub fn has_configured_key(&self) -> bool {
        self.settings.resolve_api_key(None).is_some()
    }
}
