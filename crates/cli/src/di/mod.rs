use ferrous_cdn_application::services::FetchCoordinator;
use ferrous_cdn_application::use_cases::{GetCacheStatsUseCase, ServeResourceUseCase};
use ferrous_cdn_domain::Config;
use ferrous_cdn_infrastructure::{HttpOriginFetcher, MemoryCacheStore};
use std::sync::Arc;

/// Process-wide services, built once at startup and torn down at shutdown.
pub struct CdnServices {
    pub store: Arc<MemoryCacheStore>,
    pub coordinator: Arc<FetchCoordinator>,
    pub serve_resource: Arc<ServeResourceUseCase>,
    pub get_cache_stats: Arc<GetCacheStatsUseCase>,
}

impl CdnServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let store = Arc::new(MemoryCacheStore::from_config(&config.cache));
        let fetcher = Arc::new(HttpOriginFetcher::from_config(&config.origin)?);
        let coordinator = Arc::new(FetchCoordinator::new(
            Arc::clone(&store) as _,
            fetcher,
            config.origin.timeout(),
        ));

        Ok(Self {
            serve_resource: Arc::new(ServeResourceUseCase::new(Arc::clone(&coordinator))),
            get_cache_stats: Arc::new(GetCacheStatsUseCase::new(Arc::clone(&coordinator))),
            store,
            coordinator,
        })
    }
}
