//! In-process key/value cache with optional per-entry expiry.
//!
//! Entries expire lazily: an entry found past its deadline by [`TtlCache::get`]
//! or [`TtlCache::exists`] is removed and reported as absent. The cache never
//! writes through to the database and no handler consults it.

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;

struct CacheEntry {
    value: serde_json::Value,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(deadline) if deadline <= now)
    }
}

/// Thread-safe cache keyed by string.
///
/// Values are stored as JSON so one cache can hold heterogeneous payloads;
/// callers read them back as any deserializable type. Designed to be wrapped
/// in `Arc` and shared.
#[derive(Default)]
pub struct TtlCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl TtlCache {
    /// Create a new, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a live entry, dropping it if it has expired.
    ///
    /// Returns `None` when the key is absent, expired, or does not decode as `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => {
                    return serde_json::from_value(entry.value.clone()).ok();
                }
                Some(_) => {}
            }
        }

        self.evict_if_expired(key, now).await;
        None
    }

    /// Store a value, replacing any previous entry under the same key.
    ///
    /// With `ttl = None` the entry never expires.
    pub async fn set<T: Serialize>(
        &self,
        key: impl Into<String>,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<(), serde_json::Error> {
        let entry = CacheEntry {
            value: serde_json::to_value(value)?,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.entries.write().await.insert(key.into(), entry);
        Ok(())
    }

    /// Remove an entry. Removing an absent key is a no-op.
    pub async fn remove(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    /// Whether a live entry exists for `key`.
    pub async fn exists(&self, key: &str) -> bool {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return false,
                Some(entry) if !entry.is_expired(now) => return true,
                Some(_) => {}
            }
        }

        self.evict_if_expired(key, now).await;
        false
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    // A concurrent `set` may have refreshed the entry between the read and
    // write locks, so expiry is re-checked under the write lock.
    async fn evict_if_expired(&self, key: &str, now: Instant) {
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
    }
}
