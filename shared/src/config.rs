//! Configuration management for the quiz service

use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_LIST_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub cache: CacheConfig,
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub host: String,
    pub port: u16,
    pub db: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    Redis,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub backend: CacheBackendKind,
    pub key_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub service_port: u16,
    pub list_per_page: u32,
    pub log_level: String,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Every key has a fallback.
    pub fn from_source<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, fallback: &str| lookup(key).unwrap_or_else(|| fallback.to_string());

        let db_host = get("DB_HOST", "localhost");
        let db_port: u16 = get("DB_PORT", "5432").parse()?;
        let db_user = get("DB_USER", "postgres");
        let db_password = get("DB_PASSWORD", "");
        let db_name = get("DB_NAME", "vibecheck");
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                urlencoding::encode(&db_user),
                urlencoding::encode(&db_password),
                db_host,
                db_port,
                db_name
            )
        });

        let redis_host = get("REDIS_HOST", "127.0.0.1");
        let redis_port: u16 = get("REDIS_PORT", "6379").parse()?;
        let redis_password = get("REDIS_PASSWORD", "");
        // An unparsable logical db falls back to 0 rather than failing startup.
        let redis_db = get("REDIS_DB", "0").parse::<i64>().unwrap_or(0);
        let redis_url = lookup("REDIS_URL").unwrap_or_else(|| {
            if redis_password.is_empty() {
                format!("redis://{}:{}/{}", redis_host, redis_port, redis_db)
            } else {
                format!(
                    "redis://:{}@{}:{}/{}",
                    urlencoding::encode(&redis_password),
                    redis_host,
                    redis_port,
                    redis_db
                )
            }
        });

        let backend = match get("CACHE_BACKEND", "redis").to_ascii_lowercase().as_str() {
            "redis" => CacheBackendKind::Redis,
            "memory" => CacheBackendKind::Memory,
            other => anyhow::bail!("unknown CACHE_BACKEND '{}'", other),
        };

        let list_per_page = match get("LIST_PER_PAGE", "10").parse::<u32>() {
            Ok(0) | Err(_) => DEFAULT_LIST_PER_PAGE,
            Ok(n) => n,
        };

        let service_port: u16 = lookup("SERVICE_PORT")
            .or_else(|| lookup("PORT"))
            .unwrap_or_else(|| "8080".to_string())
            .parse()?;

        Ok(Config {
            database: DatabaseConfig {
                url: database_url,
                host: db_host,
                port: db_port,
                name: db_name,
                max_connections: get("DATABASE_MAX_CONNECTIONS", "20").parse()?,
                min_connections: get("DATABASE_MIN_CONNECTIONS", "2").parse()?,
                acquire_timeout_seconds: get("DATABASE_ACQUIRE_TIMEOUT_SECONDS", "5").parse()?,
            },
            redis: RedisConfig {
                url: redis_url,
                host: redis_host,
                port: redis_port,
                db: redis_db,
            },
            cache: CacheConfig {
                backend,
                key_prefix: get("CACHE_KEY_PREFIX", ""),
            },
            app: AppConfig {
                service_port,
                list_per_page,
                log_level: get("RUST_LOG", "info"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database.url, "postgres://postgres:@localhost:5432/vibecheck");
        assert_eq!(config.redis.url, "redis://127.0.0.1:6379/0");
        assert_eq!(config.cache.backend, CacheBackendKind::Redis);
        assert_eq!(config.cache.key_prefix, "");
        assert_eq!(config.app.service_port, 8080);
        assert_eq!(config.app.list_per_page, 10);
    }

    #[test]
    fn test_url_built_from_parts() {
        let config = config_from(&[
            ("DB_HOST", "db"),
            ("DB_PORT", "6969"),
            ("DB_USER", "quiz"),
            ("DB_PASSWORD", "p@ss word"),
            ("DB_NAME", "tweets"),
            ("REDIS_HOST", "cache"),
            ("REDIS_PASSWORD", "s3cr/t"),
            ("REDIS_DB", "3"),
        ])
        .unwrap();
        assert_eq!(config.database.url, "postgres://quiz:p%40ss%20word@db:6969/tweets");
        assert_eq!(config.redis.url, "redis://:s3cr%2Ft@cache:6379/3");
    }

    #[test]
    fn test_explicit_urls_win() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://elsewhere/db"),
            ("REDIS_URL", "redis://elsewhere:6380"),
            ("DB_HOST", "ignored"),
        ])
        .unwrap();
        assert_eq!(config.database.url, "postgres://elsewhere/db");
        assert_eq!(config.redis.url, "redis://elsewhere:6380");
    }

    #[test]
    fn test_lenient_numeric_fallbacks() {
        let config = config_from(&[("LIST_PER_PAGE", "lots"), ("REDIS_DB", "x")]).unwrap();
        assert_eq!(config.app.list_per_page, 10);
        assert_eq!(config.redis.db, 0);

        let config = config_from(&[("LIST_PER_PAGE", "0")]).unwrap();
        assert_eq!(config.app.list_per_page, 10);
    }

    #[test]
    fn test_service_port_falls_back_to_port() {
        let config = config_from(&[("PORT", "9000")]).unwrap();
        assert_eq!(config.app.service_port, 9000);
        let config = config_from(&[("PORT", "9000"), ("SERVICE_PORT", "7000")]).unwrap();
        assert_eq!(config.app.service_port, 7000);
    }

    #[test]
    fn test_cache_backend_selection() {
        let config = config_from(&[("CACHE_BACKEND", "Memory")]).unwrap();
        assert_eq!(config.cache.backend, CacheBackendKind::Memory);
        assert!(config_from(&[("CACHE_BACKEND", "memcached")]).is_err());
    }
}
