use serde::{Deserialize, Serialize};

/// Point-in-time counters of the fetch coordinator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub in_flight: usize,
    pub hits: u64,
    pub misses: u64,
    /// Callers that attached to a fetch already in flight.
    pub coalesced: u64,
    pub negative_stored: u64,
    pub errors: u64,
    pub hit_rate: f64,
}

impl CacheStats {
    pub fn compute_hit_rate(hits: u64, misses: u64, coalesced: u64) -> f64 {
        let total = hits + misses + coalesced;
        if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }
}
