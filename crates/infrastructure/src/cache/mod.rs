// In-memory cache store

pub mod memory;

pub use memory::{MemoryCacheStore, DEFAULT_BATCH_EVICTION_PERCENTAGE};
