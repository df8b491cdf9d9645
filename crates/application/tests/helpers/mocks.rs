use async_trait::async_trait;
use ferrous_cdn_application::ports::{CacheStore, OriginFetcher};
use ferrous_cdn_domain::{CacheEntry, CacheKey, DomainError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

// ============================================================================
// Mock CacheStore
// ============================================================================

#[derive(Default)]
pub struct MockCacheStore {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    fail_gets: AtomicBool,
    fail_puts: AtomicBool,
    puts: AtomicUsize,
}

impl MockCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Simulates the store dropping an entry on its own.
    pub fn evict(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.lock().unwrap().remove(key)
    }

    pub fn peek(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

impl CacheStore for MockCacheStore {
    fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, DomainError> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable("mock store offline".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn put(&self, key: CacheKey, entry: CacheEntry) -> Result<(), DomainError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable("mock store read-only".to_string()));
        }
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().insert(key, entry);
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

// ============================================================================
// Mock OriginFetcher
// ============================================================================

pub struct MockOriginFetcher {
    responses: Mutex<HashMap<String, CacheEntry>>,
    fatal: Mutex<HashMap<String, DomainError>>,
    calls: Mutex<HashMap<String, usize>>,
    delay: Mutex<Option<Duration>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockOriginFetcher {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            fatal: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
            delay: Mutex::new(None),
            gate: None,
        }
    }

    /// Every fetch blocks until a permit is added to the returned semaphore.
    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let mut fetcher = Self::new();
        fetcher.gate = Some(Arc::clone(&gate));
        (fetcher, gate)
    }

    pub fn set_response(&self, key: &str, entry: CacheEntry) {
        self.responses
            .lock()
            .unwrap()
            .insert(key.to_string(), entry);
    }

    pub fn set_fatal(&self, key: &str, error: DomainError) {
        self.fatal.lock().unwrap().insert(key.to_string(), error);
    }

    pub fn clear_fatal(&self) {
        self.fatal.lock().unwrap().clear();
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Origin goes away: every later fetch yields a transport failure.
    pub fn disconnect(&self) {
        self.responses.lock().unwrap().clear();
    }

    pub fn calls(&self, key: &str) -> usize {
        self.calls.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

impl Default for MockOriginFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OriginFetcher for MockOriginFetcher {
    fn validate(&self, key: &CacheKey) -> Result<(), DomainError> {
        if key.as_str().split('/').any(|segment| segment == "..") {
            return Err(DomainError::MalformedKey(key.to_string()));
        }
        Ok(())
    }

    async fn fetch(&self, key: &CacheKey) -> Result<CacheEntry, DomainError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_insert(0) += 1;

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .expect("gate semaphore closed")
                .forget();
        }

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.fatal.lock().unwrap().get(key.as_str()) {
            return Err(error.clone());
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(key.as_str())
            .cloned()
            .unwrap_or(CacheEntry::failure(502)))
    }
}
