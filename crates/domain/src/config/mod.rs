//! Configuration module for Ferrous CDN
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `server`: Listener binding and route prefix
//! - `origin`: Upstream origin and fetch timeout
//! - `cache`: Store capacity and expiry
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod cache;
pub mod errors;
pub mod logging;
pub mod origin;
pub mod root;
pub mod server;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use origin::OriginConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
