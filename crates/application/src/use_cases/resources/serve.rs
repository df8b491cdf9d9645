use crate::services::{FetchCoordinator, RenderedResponse, ResponseRenderer};
use ferrous_cdn_domain::{CacheKey, DomainError};
use std::sync::Arc;
use tracing::instrument;

/// Entry point for the HTTP glue: raw router path in, rendered response out.
pub struct ServeResourceUseCase {
    coordinator: Arc<FetchCoordinator>,
    renderer: ResponseRenderer,
}

impl ServeResourceUseCase {
    pub fn new(coordinator: Arc<FetchCoordinator>) -> Self {
        Self {
            coordinator,
            renderer: ResponseRenderer::new(),
        }
    }

    #[instrument(skip(self), name = "serve_resource")]
    pub async fn execute(&self, path: &str) -> Result<RenderedResponse, DomainError> {
        let key = CacheKey::new(path)?;
        let entry = self.coordinator.resolve(&key).await?;
        Ok(self.renderer.render(&entry))
    }
}
