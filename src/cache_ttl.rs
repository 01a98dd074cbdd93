//! Centralized TTL constants for caching
//!
//! This module provides consistent cache time-to-live values
//! across the application with environment variable overrides.
//! A TTL of zero seconds means the entry never expires.

use std::env;
use std::time::Duration;

// Default TTL constants (in seconds)
pub const TTL_ITEM: u64 = 0; // point lookups are kept fresh by write-through
pub const TTL_ITEM_LIST: u64 = 300; // 5 minutes, lists are never invalidated

/// Get TTL with environment variable override
pub fn ttl_with_env(env_key: &str, default_ttl: u64) -> u64 {
    env::var(env_key)
        .map(|val| val.parse::<u64>().unwrap_or(default_ttl))
        .unwrap_or(default_ttl)
}

/// Turns a seconds value into an optional expiry; zero means no expiry.
pub fn as_expiry(seconds: u64) -> Option<Duration> {
    (seconds > 0).then(|| Duration::from_secs(seconds))
}

/// Expiry policy applied by the item repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtlPolicy {
    pub item: Option<Duration>,
    pub list: Option<Duration>,
}

impl Default for CacheTtlPolicy {
    fn default() -> Self {
        Self {
            item: as_expiry(TTL_ITEM),
            list: as_expiry(TTL_ITEM_LIST),
        }
    }
}

impl CacheTtlPolicy {
    /// Policy from `TTL_ITEM_SECONDS` and `TTL_ITEM_LIST_SECONDS`, or the defaults.
    pub fn from_env() -> Self {
        Self {
            item: as_expiry(ttl_with_env("TTL_ITEM_SECONDS", TTL_ITEM)),
            list: as_expiry(ttl_with_env("TTL_ITEM_LIST_SECONDS", TTL_ITEM_LIST)),
        }
    }

    /// No entry ever expires.
    pub fn unbounded() -> Self {
        Self {
            item: None,
            list: None,
        }
    }
}
