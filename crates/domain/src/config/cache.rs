use serde::{Deserialize, Serialize};
use std::time::Duration;

/// In-memory store settings.
///
/// The store is volatile and best-effort: entries (negative ones included)
/// live until they are evicted for capacity, expire through `ttl_secs`, or the
/// process restarts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Maximum stored entries, `0` disables capacity eviction
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Optional expiry; absent means entries never expire on their own
    #[serde(default)]
    pub ttl_secs: Option<u64>,

    /// How often the sweep job drops expired entries
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}

fn default_max_entries() -> usize {
    10_000
}

fn default_sweep_interval_secs() -> u64 {
    60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            ttl_secs: None,
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}
