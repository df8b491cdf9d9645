pub mod cache;
pub mod resources;

// Re-export use cases
pub use cache::GetCacheStatsUseCase;
pub use resources::ServeResourceUseCase;
