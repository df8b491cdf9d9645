//! Ferrous CDN Infrastructure Layer
//!
//! Concrete adapters for the application ports: an in-memory store and an
//! HTTP origin client.
pub mod cache;
pub mod origin;

pub use cache::MemoryCacheStore;
pub use origin::HttpOriginFetcher;
