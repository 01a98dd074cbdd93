// Connection pool setup for the store and the cache
use shared::config::{DatabaseConfig, RedisConfig};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

use crate::cache::{CacheBackend, CacheError, RedisCache};

/// Create the PostgreSQL pool described by `config`
pub async fn create_optimized_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        "🔧 Creating database pool for {}:{}/{} with {} max connections",
        config.host, config.port, config.name, config.max_connections
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .test_before_acquire(true)
        .connect(&config.url)
        .await?;

    info!("✅ Database pool created successfully");
    Ok(pool)
}

/// Create the Redis pool and check it answers PING
pub async fn create_optimized_redis_cache(config: &RedisConfig) -> Result<RedisCache, CacheError> {
    info!(
        "🔧 Creating Redis pool for {}:{} db {}",
        config.host, config.port, config.db
    );

    let cache = RedisCache::from_url(&config.url)?;
    cache.ping().await?;

    info!("✅ Redis reachable");
    Ok(cache)
}
