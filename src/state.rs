use crate::cache::{CacheBackend, MemoryCache};
use crate::cache_key::CacheKeys;
use crate::cache_ttl::CacheTtlPolicy;
use crate::domains::{ItemRepository, QuizService};
use crate::optimization::{create_optimized_db_pool, create_optimized_redis_cache};
use crate::store::PgItemStore;
use shared::config::{CacheBackendKind, Config};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// How often the in-process cache drops expired entries.
const MEMORY_CACHE_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Shared application state.
/// Holds the injected repository and quiz service; no other shared mutable state.
#[derive(Clone)]
pub struct AppState {
    pub items: ItemRepository,
    pub quiz: QuizService,
    pub list_per_page: u32,
}

impl AppState {
    /// Wire the repository and the quiz service around an existing repository.
    pub fn from_repository(items: ItemRepository, list_per_page: u32) -> Self {
        let quiz = QuizService::new(items.clone());
        Self {
            items,
            quiz,
            list_per_page,
        }
    }

    /// Connect to the configured store and cache.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = create_optimized_db_pool(&config.database).await?;
        let store = PgItemStore::new(db_pool);
        store.ensure_schema().await?;

        let cache: Arc<dyn CacheBackend> = match config.cache.backend {
            CacheBackendKind::Redis => Arc::new(create_optimized_redis_cache(&config.redis).await?),
            CacheBackendKind::Memory => {
                info!("ℹ️ CACHE_BACKEND=memory, using in-process cache");
                Arc::new(MemoryCache::with_cleanup(MEMORY_CACHE_CLEANUP_INTERVAL))
            }
        };

        let items = ItemRepository::new(Arc::new(store), cache)
            .with_keys(CacheKeys::new(config.cache.key_prefix.clone()))
            .with_ttl(CacheTtlPolicy::from_env());

        Ok(Self::from_repository(items, config.app.list_per_page))
    }
}
