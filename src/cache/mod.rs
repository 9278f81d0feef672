//! Caching module for PM-Searcher
//!
//! Keeps finished reports around for a while so the results page can offer
//! a CSV download of the same result set without searching again.

use crate::config::CacheSettings;
use crate::search::SearchReport;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Short-lived store of search reports keyed by a random id
#[derive(Clone)]
pub struct ReportCache {
    cache: Cache<String, Arc<SearchReport>>,
}

impl ReportCache {
    /// Create a new report cache with specified TTL
    pub fn new(ttl_seconds: u64, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        Self { cache }
    }

    pub fn with_settings(settings: &CacheSettings) -> Self {
        Self::new(settings.report_ttl, settings.max_reports)
    }

    /// Store a report and return the id it can be fetched with
    pub async fn insert(&self, report: SearchReport) -> String {
        let id = Uuid::new_v4().to_string();
        self.cache.insert(id.clone(), Arc::new(report)).await;
        id
    }

    /// Get a cached report
    pub async fn get(&self, id: &str) -> Option<Arc<SearchReport>> {
        self.cache.get(id).await
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::with_settings(&CacheSettings::default())
    }
}
