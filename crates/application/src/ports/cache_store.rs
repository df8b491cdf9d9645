use ferrous_cdn_domain::{CacheEntry, CacheKey, DomainError};

/// Volatile key → entry map.
///
/// Lookups never touch the network. A store that cannot answer must return
/// [`DomainError::StoreUnavailable`] instead of pretending the key is absent,
/// otherwise an outage would be indistinguishable from a cold cache.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, DomainError>;

    /// Unconditional overwrite, last writer wins.
    fn put(&self, key: CacheKey, entry: CacheEntry) -> Result<(), DomainError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop entries past their expiry. Returns how many were removed.
    fn evict_expired(&self) -> usize {
        0
    }
}
