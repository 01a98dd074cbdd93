//! Cache key generation utilities
//!
//! Every cached read derives its key from the operation and its parameters, so
//! identical requests share an entry and differing requests never collide.
//! Point lookups live under `item:`, aggregate reads under `items:`.

/// Key builder carrying an optional namespace prefix (empty by default).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheKeys {
    prefix: String,
}

impl CacheKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Generate cache key for a single item lookup
    pub fn item(&self, id: &str) -> String {
        format!("{}item:{}", self.prefix, id)
    }

    /// Generate cache key for the unfiltered item list
    pub fn all_items(&self) -> String {
        format!("{}items:all", self.prefix)
    }

    /// Generate cache key for one page of items. Callers pass the coerced page number.
    pub fn item_page(&self, page_number: u64, page_size: u32) -> String {
        format!("{}items:page:{}:{}", self.prefix, page_number, page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_keys() {
        let keys = CacheKeys::default();
        assert_eq!(keys.item("abc"), "item:abc");
        assert_eq!(keys.all_items(), "items:all");
        assert_eq!(keys.item_page(2, 10), "items:page:2:10");
    }

    #[test]
    fn test_prefixed_keys() {
        let keys = CacheKeys::new("vibecheck:");
        assert_eq!(keys.item("abc"), "vibecheck:item:abc");
        assert_eq!(keys.all_items(), "vibecheck:items:all");
    }

    #[test]
    fn test_keys_are_deterministic() {
        let keys = CacheKeys::default();
        assert_eq!(keys.item_page(3, 25), keys.item_page(3, 25));
        assert_eq!(keys.item("x"), CacheKeys::default().item("x"));
    }

    #[test]
    fn test_page_keys_never_collide() {
        let keys = CacheKeys::default();
        let mut seen = HashSet::new();
        // 1/12 vs 11/2 style ambiguities are ruled out by the separator
        for page in 1..=30 {
            for size in 1..=30 {
                assert!(seen.insert(keys.item_page(page, size)));
            }
        }
        assert!(!seen.contains(&keys.all_items()));
        assert!(!seen.contains(&keys.item("all")));
    }
}
