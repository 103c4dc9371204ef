use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::CACHE_TTL_MS;
use crate::version::error::StoreError;
use crate::version::store::KeyValueStore;

/// Record persisted under each key
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    data: T,
    /// Milliseconds since UNIX epoch of the last successful write
    timestamp: i64,
}

/// Key-value cache whose entries expire a fixed time after they were written.
///
/// Stale entries stay in the store until the next write for the same key
/// replaces them; they are simply never returned.
pub struct TimedCache<S: KeyValueStore> {
    store: S,
    ttl_ms: i64,
}

impl<S: KeyValueStore> TimedCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            ttl_ms: CACHE_TTL_MS,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get current timestamp in milliseconds since UNIX epoch
    fn current_timestamp_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    /// Stores `value` under `key` with the current time
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.write_at(key, value, Self::current_timestamp_ms())
    }

    /// Stores `value` under `key` as if written at `now_ms`
    pub fn write_at<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        now_ms: i64,
    ) -> Result<(), StoreError> {
        let entry = CacheEntry {
            data: value,
            timestamp: now_ms,
        };
        let raw = serde_json::to_string(&entry)?;
        self.store.set(key, &raw)?;

        debug!("Cached {} at {}", key, now_ms);
        Ok(())
    }

    /// Returns the value under `key` if it is still fresh
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.read_at(key, Self::current_timestamp_ms())
    }

    /// Returns the value under `key` if it is fresh at `now_ms`.
    ///
    /// Missing, unreadable and stale entries all read as `None`.
    pub fn read_at<T: DeserializeOwned>(&self, key: &str, now_ms: i64) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read cache entry {}: {}", key, e);
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Ignoring corrupt cache entry {}: {}", key, e);
                return None;
            }
        };

        let Some(age_ms) = now_ms.checked_sub(entry.timestamp) else {
            warn!(
                "Ignoring cache entry {} with out-of-range timestamp {}",
                key, entry.timestamp
            );
            return None;
        };

        if age_ms < self.ttl_ms {
            Some(entry.data)
        } else {
            debug!("Cache entry {} is stale", key);
            None
        }
    }
}
