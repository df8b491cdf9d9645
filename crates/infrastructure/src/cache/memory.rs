use dashmap::DashMap;
use ferrous_cdn_application::ports::CacheStore;
use ferrous_cdn_domain::config::CacheConfig;
use ferrous_cdn_domain::{CacheEntry, CacheKey, DomainError};
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Share of `max_entries` dropped at once when the store is full.
pub const DEFAULT_BATCH_EVICTION_PERCENTAGE: f64 = 0.1;

struct StoredEntry {
    entry: CacheEntry,
    inserted_at: Instant,
}

impl StoredEntry {
    #[inline]
    fn is_expired(&self, ttl: Option<Duration>) -> bool {
        ttl.is_some_and(|ttl| self.inserted_at.elapsed() >= ttl)
    }
}

/// Volatile process-local store.
///
/// Best-effort by contract: entries can disappear through capacity eviction
/// (oldest first, in batches) or optional expiry, and everything is lost on
/// restart. Never fails, so it never reports `StoreUnavailable`.
pub struct MemoryCacheStore {
    entries: DashMap<CacheKey, StoredEntry, FxBuildHasher>,
    max_entries: usize,
    ttl: Option<Duration>,
    batch_eviction_percentage: f64,
    evictions: AtomicU64,
}

impl MemoryCacheStore {
    /// `max_entries == 0` disables capacity eviction, `ttl == None` disables expiry.
    pub fn new(max_entries: usize, ttl: Option<Duration>) -> Self {
        info!(
            max_entries = max_entries,
            ttl_secs = ttl.map(|t| t.as_secs()),
            "Initializing in-memory cache store"
        );

        Self {
            entries: DashMap::with_capacity_and_hasher(
                max_entries.min(1 << 16),
                FxBuildHasher::default(),
            ),
            max_entries,
            ttl,
            batch_eviction_percentage: DEFAULT_BATCH_EVICTION_PERCENTAGE,
            evictions: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries, config.ttl())
    }

    pub fn with_batch_eviction_percentage(mut self, percentage: f64) -> Self {
        self.batch_eviction_percentage = percentage.clamp(0.0, 1.0);
        self
    }

    /// Entries removed for capacity or expiry since start.
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Drop everything. Called on shutdown.
    pub fn clear(&self) {
        let dropped = self.entries.len();
        self.entries.clear();
        info!(dropped, "Cache store cleared");
    }

    fn evict_oldest_batch(&self) {
        let batch = ((self.max_entries as f64 * self.batch_eviction_percentage).ceil() as usize)
            .max(1);

        let mut candidates: Vec<(CacheKey, Instant)> = self
            .entries
            .iter()
            .map(|item| (item.key().clone(), item.value().inserted_at))
            .collect();
        candidates.sort_unstable_by_key(|(_, inserted_at)| *inserted_at);

        let mut removed = 0u64;
        for (key, _) in candidates.into_iter().take(batch) {
            if self.entries.remove(&key).is_some() {
                removed += 1;
            }
        }

        self.evictions.fetch_add(removed, Ordering::Relaxed);
        debug!(removed, max_entries = self.max_entries, "Capacity eviction");
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, DomainError> {
        match self.entries.get(key) {
            None => return Ok(None),
            Some(stored) if !stored.is_expired(self.ttl) => {
                return Ok(Some(stored.entry.clone()));
            }
            Some(_) => {}
        }

        // Shard read lock is released above; re-check under the write lock.
        let ttl = self.ttl;
        if self
            .entries
            .remove_if(key, |_, stored| stored.is_expired(ttl))
            .is_some()
        {
            self.evictions.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Expired entry dropped on read");
        }
        Ok(None)
    }

    fn put(&self, key: CacheKey, entry: CacheEntry) -> Result<(), DomainError> {
        if self.max_entries > 0
            && self.entries.len() >= self.max_entries
            && !self.entries.contains_key(&key)
        {
            self.evict_oldest_batch();
        }

        self.entries.insert(
            key,
            StoredEntry {
                entry,
                inserted_at: Instant::now(),
            },
        );
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn evict_expired(&self) -> usize {
        if self.ttl.is_none() {
            return 0;
        }

        let ttl = self.ttl;
        let mut removed = 0usize;
        self.entries.retain(|_, stored| {
            let keep = !stored.is_expired(ttl);
            if !keep {
                removed += 1;
            }
            keep
        });

        self.evictions.fetch_add(removed as u64, Ordering::Relaxed);
        removed
    }
}
