use crate::ports::{CacheStore, OriginFetcher};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use ferrous_cdn_domain::{CacheEntry, CacheKey, CacheStats, DomainError};
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, warn};

/// Status recorded when the origin does not answer within the fetch timeout.
pub const TIMEOUT_STATUS: u16 = 504;

/// `None` until the owning fetch publishes its result.
type Outcome = Option<Result<CacheEntry, DomainError>>;

type Registry = DashMap<CacheKey, watch::Receiver<Outcome>, FxBuildHasher>;

#[derive(Default)]
struct CoordinatorMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    coalesced: AtomicU64,
    negative_stored: AtomicU64,
    errors: AtomicU64,
}

/// Fetch-through cache front.
///
/// Serves hits straight from the [`CacheStore`]. On a miss it guarantees at
/// most one [`OriginFetcher::fetch`] per key at a time: the first caller
/// registers an in-flight record and spawns the fetch, later callers for the
/// same key subscribe to that record and receive the identical outcome.
///
/// Failures are stored exactly like successes, so a broken origin is asked
/// once and then served from cache until the entry leaves the store.
pub struct FetchCoordinator {
    store: Arc<dyn CacheStore>,
    fetcher: Arc<dyn OriginFetcher>,
    fetch_timeout: Duration,
    in_flight: Arc<Registry>,
    metrics: Arc<CoordinatorMetrics>,
}

impl FetchCoordinator {
    pub fn new(
        store: Arc<dyn CacheStore>,
        fetcher: Arc<dyn OriginFetcher>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            store,
            fetcher,
            fetch_timeout,
            in_flight: Arc::new(DashMap::with_hasher(FxBuildHasher::default())),
            metrics: Arc::new(CoordinatorMetrics::default()),
        }
    }

    /// Return the stored entry for `key`, fetching it from the origin on a miss.
    ///
    /// Dropping the returned future only abandons this caller's wait; the
    /// fetch keeps running for everyone else attached to it.
    pub async fn resolve(&self, key: &CacheKey) -> Result<CacheEntry, DomainError> {
        let result = self.resolve_inner(key).await;
        if let Err(ref e) = result {
            self.metrics.errors.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, error = %e, "Resolve failed");
        }
        result
    }

    async fn resolve_inner(&self, key: &CacheKey) -> Result<CacheEntry, DomainError> {
        self.fetcher.validate(key)?;

        if let Some(entry) = self.lookup(key)? {
            return Ok(entry);
        }

        let rx = match self.in_flight.entry(key.clone()) {
            Entry::Occupied(slot) => {
                self.metrics.coalesced.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Attaching to in-flight fetch");
                slot.get().clone()
            }
            Entry::Vacant(slot) => {
                // The previous fetch may have stored its entry and left the
                // registry between the lookup above and taking this shard lock.
                if let Some(entry) = self.lookup(key)? {
                    return Ok(entry);
                }

                self.metrics.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Cache MISS, dispatching origin fetch");

                let (tx, rx) = watch::channel(None);
                slot.insert(rx.clone());
                self.spawn_fetch(key.clone(), tx, rx.clone());
                rx
            }
        };

        Self::wait(rx, key).await
    }

    fn lookup(&self, key: &CacheKey) -> Result<Option<CacheEntry>, DomainError> {
        let found = self.store.get(key).inspect_err(|e| {
            error!(key = %key, error = %e, "Cache store lookup failed");
        })?;

        if let Some(ref entry) = found {
            self.metrics.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, status = entry.status(), "Cache HIT");
        }
        Ok(found)
    }

    fn spawn_fetch(&self, key: CacheKey, tx: watch::Sender<Outcome>, rx: watch::Receiver<Outcome>) {
        let guard = InFlightGuard {
            registry: Arc::clone(&self.in_flight),
            key: key.clone(),
            rx,
        };
        let store = Arc::clone(&self.store);
        let fetcher = Arc::clone(&self.fetcher);
        let metrics = Arc::clone(&self.metrics);
        let fetch_timeout = self.fetch_timeout;

        tokio::spawn(async move {
            let _guard = guard;
            let outcome =
                fetch_and_store(store.as_ref(), fetcher.as_ref(), &key, fetch_timeout, &metrics)
                    .await;
            tx.send_replace(Some(outcome));
        });
    }

    async fn wait(
        mut rx: watch::Receiver<Outcome>,
        key: &CacheKey,
    ) -> Result<CacheEntry, DomainError> {
        let published = match rx.wait_for(Option::is_some).await {
            Ok(outcome) => (*outcome).clone(),
            Err(_) => None,
        };

        published.unwrap_or_else(|| {
            Err(DomainError::FetchAborted(format!(
                "fetch for '{key}' ended without a result"
            )))
        })
    }

    /// Number of keys with a fetch currently outstanding.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.metrics.hits.load(Ordering::Relaxed);
        let misses = self.metrics.misses.load(Ordering::Relaxed);
        let coalesced = self.metrics.coalesced.load(Ordering::Relaxed);

        CacheStats {
            entries: self.store.len(),
            in_flight: self.in_flight(),
            hits,
            misses,
            coalesced,
            negative_stored: self.metrics.negative_stored.load(Ordering::Relaxed),
            errors: self.metrics.errors.load(Ordering::Relaxed),
            hit_rate: CacheStats::compute_hit_rate(hits, misses, coalesced),
        }
    }
}

async fn fetch_and_store(
    store: &dyn CacheStore,
    fetcher: &dyn OriginFetcher,
    key: &CacheKey,
    fetch_timeout: Duration,
    metrics: &CoordinatorMetrics,
) -> Result<CacheEntry, DomainError> {
    let entry = match tokio::time::timeout(fetch_timeout, fetcher.fetch(key)).await {
        Ok(fetched) => fetched?,
        Err(_) => {
            warn!(
                key = %key,
                timeout_ms = fetch_timeout.as_millis() as u64,
                "Origin fetch timed out"
            );
            CacheEntry::failure(TIMEOUT_STATUS)
        }
    };

    if let CacheEntry::Failure { status } = entry {
        metrics.negative_stored.fetch_add(1, Ordering::Relaxed);
        warn!(key = %key, status, "Origin fetch failed, caching negative entry");
    }

    store.put(key.clone(), entry.clone()).inspect_err(|e| {
        error!(key = %key, error = %e, "Failed to store fetched entry");
    })?;

    Ok(entry)
}

/// Removes the in-flight record once the owning task finishes, panics included.
struct InFlightGuard {
    registry: Arc<Registry>,
    key: CacheKey,
    rx: watch::Receiver<Outcome>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry
            .remove_if(&self.key, |_, current| current.same_channel(&self.rx));
    }
}
