#![allow(dead_code)]

mod mocks;

pub use mocks::{MockCacheStore, MockOriginFetcher};

use ferrous_cdn_application::services::FetchCoordinator;
use std::sync::Arc;
use std::time::Duration;

pub fn make_coordinator(
    store: &Arc<MockCacheStore>,
    fetcher: &Arc<MockOriginFetcher>,
    timeout: Duration,
) -> Arc<FetchCoordinator> {
    Arc::new(FetchCoordinator::new(
        Arc::clone(store) as _,
        Arc::clone(fetcher) as _,
        timeout,
    ))
}
