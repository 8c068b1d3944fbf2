use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::response::TranslationResponse;

/// The only entity that outlives a request. Owned by the cache
/// collaborator; the core only ever writes whole new entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub response: TranslationResponse,
    pub created_at: DateTime<Utc>,
    pub ttl_secs: u64,
}

impl CacheEntry {
    pub fn new(key: impl Into<String>, response: TranslationResponse, ttl_secs: u64) -> Self {
        Self {
            key: key.into(),
            response,
            created_at: Utc::now(),
            ttl_secs,
        }
    }

    /// Whether the entry's TTL has elapsed at `now`. The gate checks
    /// this on every read so a misbehaving store cannot serve stale
    /// entries.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.created_at);
        age.num_seconds() >= self.ttl_secs as i64
    }
}
