//! Provider backed by an HTTP engine

use super::traits::{Engine, Provider, RequestParams};
use crate::network::HttpClient;
use crate::results::RawResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Runs an [`Engine`]'s requests through the shared [`HttpClient`]
#[derive(Clone)]
pub struct EngineProvider {
    client: HttpClient,
    engine: Arc<dyn Engine>,
}

impl EngineProvider {
    pub fn new(client: HttpClient, engine: Arc<dyn Engine>) -> Self {
        Self { client, engine }
    }
}

#[async_trait]
impl Provider for EngineProvider {
    fn name(&self) -> &str {
        self.engine.name()
    }

    async fn search(&self, params: &RequestParams) -> anyhow::Result<Vec<RawResult>> {
        let request = self.engine.request(params)?;
        debug!("{} request to {}", self.engine.name(), request.url);

        let response = self.client.execute(request).await?;
        self.engine.response(response)
    }
}
