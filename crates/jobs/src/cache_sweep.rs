use ferrous_cdn_application::ports::CacheStore;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Periodically drops expired entries so they stop occupying memory even
/// when nobody reads them again.
pub struct CacheSweepJob {
    store: Arc<dyn CacheStore>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheSweepJob {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            interval_secs: 60,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// One sweep pass. Returns how many entries were removed.
    pub fn run_once(&self) -> usize {
        let removed = self.store.evict_expired();
        if removed > 0 {
            info!(removed, remaining = self.store.len(), "Cache sweep completed");
        } else {
            debug!("Cache sweep found nothing to evict");
        }
        removed
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting cache sweep job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            // First tick completes immediately; nothing can be expired yet.
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheSweepJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.run_once();
                    }
                }
            }
        });
    }
}
