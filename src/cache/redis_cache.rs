// ============================================================================
// REDIS CACHE - deadpool-managed connections to the shared cache
// ============================================================================

use super::{CacheBackend, CacheError};
use async_trait::async_trait;
use deadpool_redis::{Config as PoolConfig, Pool as RedisPool, Runtime};
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Clone)]
pub struct RedisCache {
    pool: RedisPool,
}

impl RedisCache {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Builds a pool for `redis_url`. No connection is opened until first use.
    pub fn from_url(redis_url: &str) -> Result<Self, CacheError> {
        let pool = PoolConfig::from_url(redis_url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| CacheError::Unavailable {
                message: format!("Failed to create Redis pool: {}", e),
            })?;
        info!("🔧 Redis pool created");
        Ok(Self { pool })
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.pool.get().await?;
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut conn = self.pool.get().await?;
        match ttl {
            // SET EX rejects 0, so sub-second expiries round up
            Some(ttl) => {
                let seconds = ttl.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds).await?;
            }
            None => conn.set::<_, _, ()>(key, value).await?,
        }
        debug!(key = %key, ttl = ?ttl, "Redis key set");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.pool.get().await?;
        let deleted: i64 = conn.del(key).await?;
        debug!(key = %key, deleted = deleted > 0, "Redis key deletion");
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.pool.get().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
