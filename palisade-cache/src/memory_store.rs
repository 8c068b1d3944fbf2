//! In-process cache store backed by moka.
//!
//! Serves single-process deployments and tests; production deployments
//! point the gate at a networked store behind the same trait.

use std::time::Duration;

use moka::sync::Cache;
use palisade_core::errors::CacheError;
use palisade_core::traits::ICacheStore;

/// TinyLFU in-memory store. Eviction is size-bound here; per-entry TTL
/// is enforced by the gate on read.
pub struct MemoryCacheStore {
    cache: Cache<String, Vec<u8>>,
}

impl MemoryCacheStore {
    /// Create a store holding at most `max_entries` responses.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(Duration::from_secs(86400))
            .build();
        Self { cache }
    }

    /// Number of entries currently held.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ICacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.cache.get(key))
    }

    fn set(&self, key: &str, bytes: Vec<u8>, _ttl: Duration) -> Result<(), CacheError> {
        self.cache.insert(key.to_string(), bytes);
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let store = MemoryCacheStore::new(10);
        store
            .set("a", vec![1, 2, 3], Duration::from_secs(60))
            .unwrap();
        assert_eq!(store.get("a").unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn miss_is_none() {
        let store = MemoryCacheStore::new(10);
        assert_eq!(store.get("absent").unwrap(), None);
    }

    #[test]
    fn overwrite_replaces() {
        let store = MemoryCacheStore::new(10);
        store.set("a", vec![1], Duration::from_secs(60)).unwrap();
        store.set("a", vec![2], Duration::from_secs(60)).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(vec![2]));
    }
}
