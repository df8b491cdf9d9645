mod cache_store;
mod origin_fetcher;

pub use cache_store::CacheStore;
pub use origin_fetcher::OriginFetcher;
