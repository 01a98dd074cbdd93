// ============================================================================
// CACHE MODULE - Key-value cache backends
// ============================================================================

pub mod memory;
pub mod redis_cache;

pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failure of a cache operation. The item repository absorbs every one of these;
/// they never reach a request handler.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache connection unavailable: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    #[error("Cache command failed: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Cache unavailable: {message}")]
    Unavailable { message: String },
}

/// Raw byte cache: `GET`, `SET` with optional expiry, `DEL`.
///
/// Implementations must be atomic per key; nothing is assumed across keys.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `value` under `key`; `ttl = None` keeps it until overwritten or deleted.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    async fn ping(&self) -> Result<(), CacheError>;
}
