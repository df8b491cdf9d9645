use async_trait::async_trait;
use ferrous_cdn_domain::{CacheEntry, CacheKey, DomainError};

#[async_trait]
pub trait OriginFetcher: Send + Sync {
    /// Check that `key` maps to a valid origin address. No I/O.
    fn validate(&self, _key: &CacheKey) -> Result<(), DomainError> {
        Ok(())
    }

    /// One origin round trip, classified into a [`CacheEntry`].
    ///
    /// Origin errors and transport failures come back as
    /// `Ok(CacheEntry::Failure { .. })`. `Err` is reserved for faults that
    /// must not be cached, such as a key that cannot be turned into a URL.
    async fn fetch(&self, key: &CacheKey) -> Result<CacheEntry, DomainError>;
}
