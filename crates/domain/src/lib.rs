//! Ferrous CDN Domain Layer
pub mod cache_entry;
pub mod cache_key;
pub mod cache_stats;
pub mod config;
pub mod errors;
pub mod validators;

pub use cache_entry::CacheEntry;
pub use cache_key::CacheKey;
pub use cache_stats::CacheStats;
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
