use ferrous_cdn_application::ports::CacheStore;
use ferrous_cdn_domain::{CacheEntry, CacheKey};
use ferrous_cdn_infrastructure::MemoryCacheStore;
use ferrous_cdn_jobs::{CacheSweepJob, JobRunner};
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

fn key(raw: &str) -> CacheKey {
    CacheKey::new(raw).unwrap()
}

fn seeded_store(ttl: Duration) -> Arc<MemoryCacheStore> {
    let store = Arc::new(MemoryCacheStore::new(100, Some(ttl)));
    store
        .put(key("a.js"), CacheEntry::success("application/javascript", &b"a"[..]))
        .unwrap();
    store.put(key("b.js"), CacheEntry::failure(503)).unwrap();
    store
}

// ============================================================================
// Tests: CacheSweepJob::run_once
// ============================================================================

#[tokio::test]
async fn test_run_once_removes_expired_entries() {
    // Arrange - two entries that expire after 20ms
    let store = seeded_store(Duration::from_millis(20));
    let job = CacheSweepJob::new(Arc::clone(&store) as _);
    sleep(Duration::from_millis(40)).await;

    // Act
    let removed = job.run_once();

    // Assert
    assert_eq!(removed, 2);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_run_once_keeps_fresh_entries() {
    // Arrange - long TTL
    let store = seeded_store(Duration::from_secs(300));
    let job = CacheSweepJob::new(Arc::clone(&store) as _);

    // Act
    let removed = job.run_once();

    // Assert - nothing swept
    assert_eq!(removed, 0);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_run_once_without_ttl_is_noop() {
    let store = Arc::new(MemoryCacheStore::new(100, None));
    store.put(key("forever.js"), CacheEntry::failure(404)).unwrap();
    let job = CacheSweepJob::new(Arc::clone(&store) as _);

    assert_eq!(job.run_once(), 0);
    assert_eq!(store.len(), 1);
}

// ============================================================================
// Tests: background loop
// ============================================================================

#[tokio::test]
async fn test_job_sweeps_on_interval_and_stops_on_cancel() {
    // Arrange
    let store = seeded_store(Duration::from_millis(50));
    let token = CancellationToken::new();
    let job = CacheSweepJob::new(Arc::clone(&store) as _)
        .with_interval(1)
        .with_cancellation(token.clone());

    // Act - let one interval elapse
    JobRunner::new().with_cache_sweep(job).start().await;
    sleep(Duration::from_millis(1300)).await;

    // Assert - entries expired and were swept without any read
    assert_eq!(store.len(), 0);
    assert_eq!(store.evictions(), 2);

    // After cancellation new stale entries are left alone
    token.cancel();
    sleep(Duration::from_millis(50)).await;
    store.put(key("late.js"), CacheEntry::failure(500)).unwrap();
    sleep(Duration::from_millis(1200)).await;
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_runner_without_jobs_starts_cleanly() {
    JobRunner::default().start().await;
}
