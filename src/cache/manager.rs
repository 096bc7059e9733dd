//! Freshness cache for exercise detail payloads
//!
//! Provides a `DetailCache` that stores serializable payloads with the time
//! they were written, and only hands them back while they are younger than
//! the TTL.

use std::sync::Arc;
use std::time::Duration;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::store::{KeyValueStore, StoreError};

/// How long a detail entry stays fresh
pub const DETAIL_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Prefix shared by every detail entry's storage key
const KEY_PREFIX: &str = "exercise_";

/// Wrapper struct for cached data as it is persisted
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    /// The cached payload
    #[serde(rename = "data")]
    payload: T,
    /// When the payload was written, in milliseconds since the epoch
    #[serde(rename = "timestamp")]
    written_at: i64,
}

/// Errors that can occur when writing to the cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// Cache keys must be non-empty
    #[error("cache key must not be empty")]
    EmptyKey,

    /// The payload could not be serialized
    #[error("failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The underlying store rejected the write
    #[error("failed to write cache entry: {0}")]
    Store(#[from] StoreError),
}

/// Reads and writes exercise payloads with a fixed time-to-live
///
/// Entries are keyed by exercise identifier. A read returns the payload only
/// while `now - written_at < ttl`; stale, missing and unreadable entries are
/// all plain misses. Nothing is ever deleted, a later `put` simply replaces
/// the stored entry.
#[derive(Debug, Clone)]
pub struct DetailCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl_millis: i64,
}

impl DetailCache {
    /// Creates a cache over `store` using wall-clock time
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates a cache over `store` reading time from `clock`
    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            ttl_millis: DETAIL_TTL.as_millis() as i64,
        }
    }

    /// Returns the storage key for an exercise identifier
    pub fn storage_key(key: &str) -> String {
        format!("{}{}", KEY_PREFIX, key)
    }

    /// Returns the payload for `key` if a fresh entry exists
    ///
    /// Never fails: a missing, stale or corrupted entry is reported as `None`
    /// so the caller falls through to its network fetch.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if key.is_empty() {
            return None;
        }

        let storage_key = Self::storage_key(key);
        let Some(raw) = self.store.get(&storage_key) else {
            debug!(cache_key = %storage_key, "Cache miss: absent");
            return None;
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(cache_key = %storage_key, error = %e, "Cache miss: unreadable entry");
                return None;
            }
        };

        let Some(age) = self.clock.now_millis().checked_sub(entry.written_at) else {
            debug!(
                cache_key = %storage_key,
                written_at = entry.written_at,
                "Cache miss: timestamp out of range"
            );
            return None;
        };
        if age < self.ttl_millis {
            debug!(cache_key = %storage_key, age_ms = age, "Cache hit");
            Some(entry.payload)
        } else {
            debug!(cache_key = %storage_key, age_ms = age, "Cache miss: stale");
            None
        }
    }

    /// Stores `payload` under `key`, replacing any previous entry
    ///
    /// The write timestamp never moves backwards for a key, even if the clock does.
    pub fn put<T: Serialize>(&self, key: &str, payload: &T) -> Result<(), CacheError> {
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        let storage_key = Self::storage_key(key);
        let now = self.clock.now_millis();
        let written_at = match self.previous_written_at(&storage_key) {
            Some(previous) => previous.max(now),
            None => now,
        };

        let entry = CacheEntry {
            payload,
            written_at,
        };
        let json = serde_json::to_string(&entry)?;
        self.store.put(&storage_key, &json)?;

        debug!(cache_key = %storage_key, written_at, "Cache write");
        Ok(())
    }

    /// Timestamp of the currently stored entry, if it can be read
    fn previous_written_at(&self, storage_key: &str) -> Option<i64> {
        let raw = self.store.get(storage_key)?;
        let entry: CacheEntry<IgnoredAny> = serde_json::from_str(&raw).ok()?;
        Some(entry.written_at)
    }
}
