// ============================================================================
// MEMORY CACHE - in-process backend for local runs and tests
// ============================================================================

use super::{CacheBackend, CacheError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::debug;

#[derive(Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expiry: Option<Instant>,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expiry.map_or(true, |expiry| expiry > now)
    }
}

#[derive(Clone, Default)]
pub struct MemoryCache {
    store: Arc<DashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }

    /// Like [`MemoryCache::new`], plus a background task that drops expired
    /// entries every `every`. The task stops once the last handle is dropped.
    /// Must be called from within a tokio runtime.
    pub fn with_cleanup(every: Duration) -> Self {
        let cache = Self::new();
        let weak: Weak<DashMap<String, CacheEntry>> = Arc::downgrade(&cache.store);

        tokio::spawn(async move {
            let mut ticker = interval(every);
            loop {
                ticker.tick().await;
                let Some(store) = weak.upgrade() else {
                    break;
                };
                let removed = sweep(&store);
                if removed > 0 {
                    debug!("🧹 Dropped {} expired cache entries", removed);
                }
            }
        });

        cache
    }

    /// Live entry under `key`, without going through the trait.
    pub fn peek(&self, key: &str) -> Option<Vec<u8>> {
        let now = Instant::now();
        self.store
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.peek(key).is_some()
    }

    /// Writes raw bytes under `key`, e.g. to plant a malformed entry.
    pub fn insert_raw(&self, key: &str, value: impl Into<Vec<u8>>) {
        self.store.insert(
            key.to_string(),
            CacheEntry {
                value: value.into(),
                expiry: None,
            },
        );
    }

    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.store.iter().filter(|entry| entry.is_live(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all expired entries from the cache
    pub fn cleanup_expired(&self) -> usize {
        sweep(&self.store)
    }
}

fn sweep(store: &DashMap<String, CacheEntry>) -> usize {
    let now = Instant::now();
    let before_count = store.len();
    store.retain(|_, entry| entry.is_live(now));
    before_count.saturating_sub(store.len())
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let now = Instant::now();
        if let Some(entry) = self.store.get(key) {
            if entry.is_live(now) {
                return Ok(Some(entry.value.clone()));
            }
        }
        // Expired entries are dropped lazily
        self.store.remove_if(key, |_, entry| !entry.is_live(now));
        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), CacheError> {
        let entry = CacheEntry {
            value: value.to_vec(),
            expiry: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.store.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.remove(key);
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
