use thiserror::Error;

/// Errors surfaced to callers of the fetch-through cache.
///
/// Origin failures are not represented here: a broken origin produces a
/// [`CacheEntry::Failure`](crate::CacheEntry::Failure) that is cached like any
/// other outcome. Only infrastructure faults travel as errors, and none of
/// them are ever cached.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed cache key: {0}")]
    MalformedKey(String),

    #[error("Cache store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Origin fetch aborted: {0}")]
    FetchAborted(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
