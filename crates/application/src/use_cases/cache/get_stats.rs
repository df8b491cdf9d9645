use crate::services::FetchCoordinator;
use ferrous_cdn_domain::CacheStats;
use std::sync::Arc;

pub struct GetCacheStatsUseCase {
    coordinator: Arc<FetchCoordinator>,
}

impl GetCacheStatsUseCase {
    pub fn new(coordinator: Arc<FetchCoordinator>) -> Self {
        Self { coordinator }
    }

    pub fn execute(&self) -> CacheStats {
        self.coordinator.stats()
    }
}
