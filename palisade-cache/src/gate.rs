//! The gate in front of the cache collaborator.

use std::time::Duration;

use chrono::Utc;
use palisade_core::models::{CacheEntry, TranslationResponse, ValidationStatus};
use palisade_core::traits::ICacheStore;
use tracing::{debug, warn};

/// Wraps the store with TTL policy, freshness checking, and
/// degrade-to-passthrough on collaborator failure.
pub struct CacheGate<'a> {
    store: &'a dyn ICacheStore,
    ttl_secs: u64,
    enabled: bool,
}

impl<'a> CacheGate<'a> {
    pub fn new(store: &'a dyn ICacheStore, ttl_secs: u64, enabled: bool) -> Self {
        Self {
            store,
            ttl_secs,
            enabled,
        }
    }

    /// Look up a previously validated response. Returns `None` on miss,
    /// expiry, decode failure, or collaborator failure — the pipeline
    /// proceeds identically in every case.
    pub fn lookup(&self, key: &str) -> Option<TranslationResponse> {
        if !self.enabled {
            return None;
        }

        let bytes = match self.store.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(key, "cache miss");
                return None;
            }
            Err(e) => {
                warn!(store = self.store.name(), error = %e, "cache degraded to pass-through");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, error = %e, "cache entry undecodable, ignoring");
                return None;
            }
        };

        // The gate enforces freshness itself; a store that never
        // expires entries cannot serve stale responses.
        if entry.is_expired(Utc::now()) {
            debug!(key, "cache entry expired");
            return None;
        }

        debug!(key, "cache hit");
        Some(entry.response)
    }

    /// Store a validated response. Only `accepted` and `corrected`
    /// results are ever written; a collaborator failure is a no-op.
    pub fn store(&self, key: &str, response: &TranslationResponse) {
        if !self.enabled {
            return;
        }
        if response.validation.status == ValidationStatus::Rejected {
            warn!(key, "refusing to cache a rejected result");
            return;
        }

        let entry = CacheEntry::new(key, response.clone(), self.ttl_secs);
        let bytes = match serde_json::to_vec(&entry) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key, error = %e, "cache entry serialization failed");
                return;
            }
        };

        if let Err(e) = self
            .store
            .set(key, bytes, Duration::from_secs(self.ttl_secs))
        {
            warn!(store = self.store.name(), error = %e, "cache write failed, continuing");
        }
    }
}
