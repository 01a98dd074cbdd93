// ============================================================================
// ITEM REPOSITORY - cache-aside access to quiz items
// ============================================================================
//
// Every read and write against items goes through here. Reads try the cache
// first and fall back to the store; writes hit the store first and then
// overwrite or drop the id-keyed cache entry. Cache failures of any kind are
// logged and absorbed: the store is the only source of truth.
//
// List and page entries are populated on miss and are NOT invalidated by
// single-item writes. They go stale until their TTL runs out.

use crate::cache::CacheBackend;
use crate::cache_key::CacheKeys;
use crate::cache_ttl::CacheTtlPolicy;
use crate::store::ItemStore;
use serde::{de::DeserializeOwned, Serialize};
use shared::{AppError, Item, NewItem, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct ItemRepository {
    store: Arc<dyn ItemStore>,
    cache: Arc<dyn CacheBackend>,
    keys: CacheKeys,
    ttl: CacheTtlPolicy,
}

impl ItemRepository {
    pub fn new(store: Arc<dyn ItemStore>, cache: Arc<dyn CacheBackend>) -> Self {
        Self {
            store,
            cache,
            keys: CacheKeys::default(),
            ttl: CacheTtlPolicy::default(),
        }
    }

    pub fn with_keys(mut self, keys: CacheKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_ttl(mut self, ttl: CacheTtlPolicy) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<dyn CacheBackend> {
        &self.cache
    }

    pub fn keys(&self) -> &CacheKeys {
        &self.keys
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// Point lookup. Absent items are not cached.
    pub async fn fetch_one(&self, id: &str) -> Result<Option<Item>> {
        let key = self.keys.item(id);
        self.read_through(&key, self.ttl.item, || self.store.find_by_id(id))
            .await
    }

    /// Every item, ordered by id.
    pub async fn fetch_all(&self) -> Result<Vec<Item>> {
        let key = self.keys.all_items();
        let items = self
            .read_through(&key, self.ttl.list, || async {
                self.store.list_all().await.map(Some)
            })
            .await?;
        Ok(items.unwrap_or_default())
    }

    /// One page of items ordered by id. Page numbers below 1 read page 1 and a
    /// zero page size is read as 1.
    pub async fn fetch_page(&self, page_number: i64, page_size: u32) -> Result<Vec<Item>> {
        let page_number = page_number.max(1) as u64;
        let page_size = page_size.max(1);
        let limit = i64::from(page_size);
        let offset = i64::try_from(page_number - 1)
            .unwrap_or(i64::MAX)
            .saturating_mul(limit);

        let key = self.keys.item_page(page_number, page_size);
        let items = self
            .read_through(&key, self.ttl.list, || async {
                self.store.list_page(limit, offset).await.map(Some)
            })
            .await?;
        Ok(items.unwrap_or_default())
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    /// Inserts a new item under a freshly generated id and returns that id.
    pub async fn create(&self, new_item: NewItem) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let item = new_item.with_id(id.clone());

        self.store.insert(&item).await?;
        info!("Created tweet {}", id);

        self.populate(&self.keys.item(&id), &item, self.ttl.item).await;
        Ok(id)
    }

    /// Overwrites the stored row and then the cached copy. A missing row is
    /// reported by the store as zero affected rows and surfaces as `NotFound`.
    pub async fn update(&self, item: &Item) -> Result<()> {
        let changed = self.store.update(item).await?;
        if changed == 0 {
            return Err(AppError::not_found(format!("tweet {}", item.id)));
        }
        info!("Updated tweet {}", item.id);

        self.populate(&self.keys.item(&item.id), item, self.ttl.item).await;
        Ok(())
    }

    /// Removes the row and its cached copy. Deleting an unknown id succeeds.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let removed = self.store.delete(id).await?;
        info!("Deleted tweet {} ({} rows)", id, removed);

        self.evict(&self.keys.item(id)).await;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Two-tier lookup
    // ------------------------------------------------------------------------

    /// Cache first; on a miss, an unreachable cache or a malformed entry, `load`
    /// from the store and populate the cache with whatever it returned.
    ///
    /// The populate is unconditional, so a miss racing an update can put the older
    /// row back. `TTL_ITEM_SECONDS` bounds how long that entry survives.
    async fn read_through<T, F, Fut>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        load: F,
    ) -> Result<Option<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>>>,
    {
        if let Some(hit) = self.cached::<T>(key).await {
            return Ok(Some(hit));
        }

        let loaded = load().await?;
        if let Some(value) = &loaded {
            self.populate(key, value, ttl).await;
        }
        Ok(loaded)
    }

    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    debug!("Cache HIT: {}", key);
                    Some(value)
                }
                Err(e) => {
                    warn!("Malformed cache entry {}, reading store: {}", key, e);
                    None
                }
            },
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                None
            }
            Err(e) => {
                warn!("Cache read failed for {}, reading store: {}", key, e);
                None
            }
        }
    }

    /// Best-effort write; failures only cost a future miss.
    async fn populate<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to serialize cache entry {}: {}", key, e);
                return;
            }
        };

        match self.cache.set(key, &bytes, ttl).await {
            Ok(()) => debug!("Cached {}", key),
            Err(e) => warn!("Failed to cache {}: {}", key, e),
        }
    }

    async fn evict(&self, key: &str) {
        match self.cache.delete(key).await {
            Ok(()) => debug!("Invalidated {}", key),
            Err(e) => warn!("Failed to invalidate {}: {}", key, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheError, MemoryCache};
    use crate::store::MemoryItemStore;
    use async_trait::async_trait;

    /// Cache whose every operation fails, as if Redis were down.
    struct DownCache;

    #[async_trait]
    impl CacheBackend for DownCache {
        async fn get(&self, _key: &str) -> std::result::Result<Option<Vec<u8>>, CacheError> {
            Err(CacheError::Unavailable {
                message: "connection refused".to_string(),
            })
        }

        async fn set(
            &self,
            _key: &str,
            _value: &[u8],
            _ttl: Option<Duration>,
        ) -> std::result::Result<(), CacheError> {
            Err(CacheError::Unavailable {
                message: "connection refused".to_string(),
            })
        }

        async fn delete(&self, _key: &str) -> std::result::Result<(), CacheError> {
            Err(CacheError::Unavailable {
                message: "connection refused".to_string(),
            })
        }

        async fn ping(&self) -> std::result::Result<(), CacheError> {
            Err(CacheError::Unavailable {
                message: "connection refused".to_string(),
            })
        }
    }

    fn new_item(text: &str, hint: &str, answer: &str) -> NewItem {
        NewItem {
            text: text.to_string(),
            hint: hint.to_string(),
            answer: answer.to_string(),
        }
    }

    fn setup() -> (ItemRepository, MemoryItemStore, MemoryCache) {
        let store = MemoryItemStore::new();
        let cache = MemoryCache::new();
        let repo = ItemRepository::new(Arc::new(store.clone()), Arc::new(cache.clone()));
        (repo, store, cache)
    }

    #[tokio::test]
    async fn test_create_caches_full_item() {
        let (repo, _store, cache) = setup();
        let id = repo.create(new_item("2+2?", "even", "4")).await.unwrap();

        let raw = cache.peek(&format!("item:{}", id)).expect("entry written on create");
        let cached: Item = serde_json::from_slice(&raw).unwrap();
        assert_eq!(cached.id, id);
        assert_eq!(cached.answer, "4");
    }

    #[tokio::test]
    async fn test_hit_does_not_touch_store() {
        let (repo, store, _cache) = setup();
        let id = repo.create(new_item("q", "h", "a")).await.unwrap();

        // Remove the row behind the repository's back; the cached copy still answers.
        store.delete(&id).await.unwrap();
        let item = repo.fetch_one(&id).await.unwrap();
        assert_eq!(item.map(|i| i.text), Some("q".to_string()));
    }

    #[tokio::test]
    async fn test_miss_populates_and_absent_is_not_cached() {
        let (repo, store, cache) = setup();
        let item = new_item("q", "h", "a").with_id("seeded");
        store.insert(&item).await.unwrap();

        assert_eq!(repo.fetch_one("seeded").await.unwrap(), Some(item));
        assert!(cache.contains_key("item:seeded"));

        assert_eq!(repo.fetch_one("ghost").await.unwrap(), None);
        assert!(!cache.contains_key("item:ghost"));
    }

    #[tokio::test]
    async fn test_malformed_entry_falls_back_to_store() {
        let (repo, store, cache) = setup();
        let item = new_item("q", "h", "a").with_id("x1");
        store.insert(&item).await.unwrap();
        cache.insert_raw("item:x1", "{not json");

        assert_eq!(repo.fetch_one("x1").await.unwrap(), Some(item.clone()));
        // The bad entry is replaced by the store's copy
        let repaired: Item = serde_json::from_slice(&cache.peek("item:x1").unwrap()).unwrap();
        assert_eq!(repaired, item);
    }

    #[tokio::test]
    async fn test_update_overwrites_cached_copy() {
        let (repo, _store, _cache) = setup();
        let id = repo.create(new_item("q", "h", "old")).await.unwrap();
        assert!(repo.fetch_one(&id).await.unwrap().is_some());

        let changed = new_item("q2", "h2", "new").with_id(id.clone());
        repo.update(&changed).await.unwrap();

        assert_eq!(repo.fetch_one(&id).await.unwrap(), Some(changed));
    }

    #[tokio::test]
    async fn test_update_of_missing_id_is_not_found_and_not_cached() {
        let (repo, _store, cache) = setup();
        let ghost = new_item("q", "h", "a").with_id("ghost");

        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert!(!cache.contains_key("item:ghost"));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (repo, _store, cache) = setup();
        let id = repo.create(new_item("q", "h", "a")).await.unwrap();
        let key = format!("item:{}", id);

        repo.delete(&id).await.unwrap();
        assert!(!cache.contains_key(&key));
        repo.delete(&id).await.unwrap();
        assert!(!cache.contains_key(&key));
        assert_eq!(repo.fetch_one(&id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_pages_use_distinct_keys_and_do_not_overlap() {
        let (repo, store, cache) = setup();
        for n in 0..25 {
            store
                .insert(&new_item("q", "h", "a").with_id(format!("id-{:02}", n)))
                .await
                .unwrap();
        }

        let first = repo.fetch_page(1, 10).await.unwrap();
        let second = repo.fetch_page(2, 10).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(second.len(), 10);
        assert!(first.iter().all(|a| second.iter().all(|b| a.id != b.id)));
        assert_eq!(first[0].id, "id-00");
        assert_eq!(second[0].id, "id-10");

        assert!(cache.contains_key("items:page:1:10"));
        assert!(cache.contains_key("items:page:2:10"));
    }

    #[tokio::test]
    async fn test_page_number_is_coerced_before_keying() {
        let (repo, store, cache) = setup();
        store.insert(&new_item("q", "h", "a").with_id("only")).await.unwrap();

        let page = repo.fetch_page(-3, 10).await.unwrap();
        assert_eq!(page.len(), 1);
        assert!(cache.contains_key("items:page:1:10"));
        assert!(!cache.contains_key("items:page:-3:10"));
    }

    #[tokio::test]
    async fn test_lists_are_not_invalidated_by_item_writes() {
        let (repo, _store, _cache) = setup();
        repo.create(new_item("first", "h", "a")).await.unwrap();
        assert_eq!(repo.fetch_all().await.unwrap().len(), 1);

        repo.create(new_item("second", "h", "a")).await.unwrap();
        // Served from the stale list entry
        assert_eq!(repo.fetch_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lists_refresh_from_store_after_ttl() {
        let store = MemoryItemStore::new();
        let cache = MemoryCache::new();
        let repo = ItemRepository::new(Arc::new(store), Arc::new(cache.clone())).with_ttl(
            CacheTtlPolicy {
                list: Some(Duration::from_millis(30)),
                ..CacheTtlPolicy::unbounded()
            },
        );

        repo.create(new_item("first", "h", "a")).await.unwrap();
        assert_eq!(repo.fetch_all().await.unwrap().len(), 1);
        assert_eq!(repo.fetch_page(1, 10).await.unwrap().len(), 1);

        repo.create(new_item("second", "h", "a")).await.unwrap();
        assert_eq!(repo.fetch_all().await.unwrap().len(), 1);

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(repo.fetch_all().await.unwrap().len(), 2);
        assert_eq!(repo.fetch_page(1, 10).await.unwrap().len(), 2);
        assert!(cache.contains_key("items:all"));
    }

    #[tokio::test]
    async fn test_cache_outage_never_fails_calls() {
        let store = MemoryItemStore::new();
        let repo = ItemRepository::new(Arc::new(store), Arc::new(DownCache));

        let id = repo.create(new_item("q", "h", "a")).await.unwrap();
        assert!(repo.fetch_one(&id).await.unwrap().is_some());
        assert_eq!(repo.fetch_all().await.unwrap().len(), 1);
        assert_eq!(repo.fetch_page(1, 10).await.unwrap().len(), 1);

        repo.update(&new_item("q", "h", "b").with_id(id.clone())).await.unwrap();
        assert_eq!(repo.fetch_one(&id).await.unwrap().unwrap().answer, "b");

        repo.delete(&id).await.unwrap();
        assert_eq!(repo.fetch_one(&id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_prefixed_keys_are_used() {
        let store = MemoryItemStore::new();
        let cache = MemoryCache::new();
        let repo = ItemRepository::new(Arc::new(store), Arc::new(cache.clone()))
            .with_keys(CacheKeys::new("quiz:"))
            .with_ttl(CacheTtlPolicy::unbounded());

        let id = repo.create(new_item("q", "h", "a")).await.unwrap();
        assert!(cache.contains_key(&format!("quiz:item:{}", id)));
        assert!(!cache.contains_key(&format!("item:{}", id)));
    }
}
