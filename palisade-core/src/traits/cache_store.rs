use std::time::Duration;

use crate::errors::CacheError;

/// Key-value cache collaborator. Both operations must tolerate
/// transient unavailability; the gate degrades on error.
pub trait ICacheStore: Send + Sync {
    /// Fetch the raw bytes stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `bytes` under `key` with the given time-to-live.
    fn set(&self, key: &str, bytes: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    /// Whether the store is currently reachable.
    fn is_available(&self) -> bool;

    /// Human-readable collaborator name.
    fn name(&self) -> &str;
}
