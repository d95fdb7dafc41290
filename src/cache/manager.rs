//! In-memory response cache with lazy TTL expiry
//!
//! Provides a `ResponseCache` that maps string keys to JSON payloads stamped
//! with the time they were stored. Entries are checked for expiry when read;
//! there is no background sweep.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

/// Default time-to-live for cache entries in seconds (5 minutes)
pub const DEFAULT_TTL_SECS: i64 = 5 * 60;

/// A cached payload together with the time it was stored
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached payload
    payload: Value,
    /// When the payload was cached
    stored_at: DateTime<Utc>,
}

impl CacheEntry {
    /// An entry is valid while its age does not exceed the TTL
    fn is_valid(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.stored_at <= ttl
    }
}

/// Process-local cache of API responses
///
/// Each instance has a fixed TTL. Entries older than the TTL are treated as
/// absent and are removed on the next `get`. The cache is unbounded and only
/// shrinks through expiry or `clear`.
///
/// The map sits behind a mutex so a cache can be shared through `&self`.
/// The lock is only taken for the synchronous read or write around a request,
/// never while a request is in flight.
#[derive(Debug)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS))
    }
}

impl ResponseCache {
    /// Creates an empty cache whose entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the TTL applied to every entry
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // A panic while holding the lock cannot leave the map half-written,
        // so a poisoned lock is still safe to use.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Stores `payload` under `key`, replacing any existing entry
    pub fn set(&self, key: &str, payload: Value) {
        self.set_at(key, payload, Utc::now());
    }

    fn set_at(&self, key: &str, payload: Value, now: DateTime<Utc>) {
        self.entries().insert(
            key.to_string(),
            CacheEntry {
                payload,
                stored_at: now,
            },
        );
    }

    /// Reads a payload from the cache
    ///
    /// # Returns
    /// * `Some(Value)` if the entry exists and is still within its TTL
    /// * `None` if the entry is missing, or if it has expired (the expired
    ///   entry is removed)
    pub fn get(&self, key: &str) -> Option<Value> {
        self.get_at(key, Utc::now())
    }

    fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<Value> {
        let mut entries = self.entries();
        let entry = entries.get(key)?;

        if entry.is_valid(now, self.ttl) {
            return Some(entry.payload.clone());
        }

        log::debug!("cache entry '{}' expired", key);
        entries.remove(key);
        None
    }

    /// Removes every entry regardless of age
    pub fn clear(&self) {
        self.entries().clear();
    }

    /// Number of stored entries, including expired ones not yet evicted
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Returns the cached payload for `key`, or runs `producer` to fetch it
    ///
    /// A valid entry is returned without invoking `producer`. On a miss the
    /// producer's successful result is stored under `key` before being
    /// returned. Errors are passed through and never cached.
    pub async fn cached_request<F, Fut, E>(&self, key: &str, producer: F) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        if let Some(payload) = self.get(key) {
            log::debug!("cache hit for '{}'", key);
            return Ok(payload);
        }

        log::debug!("cache miss for '{}'", key);
        let payload = producer().await?;
        self.set(key, payload.clone());
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let cache = ResponseCache::default();

        assert!(cache.get("nonexistent_key").is_none());
    }

    #[test]
    fn test_set_then_get_returns_payload() {
        let cache = ResponseCache::default();
        let payload = json!({"song_id": 7, "title": "Blue"});

        cache.set("song_7", payload.clone());

        assert_eq!(cache.get("song_7"), Some(payload));
    }

    #[test]
    fn test_overwrite_existing_entry() {
        let cache = ResponseCache::default();

        cache.set("overwrite_key", json!("first"));
        cache.set("overwrite_key", json!("second"));

        assert_eq!(cache.get("overwrite_key"), Some(json!("second")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_entry_expires_one_second_past_ttl() {
        let cache = ResponseCache::default();
        let stored_at = Utc::now();

        cache.set_at("expiring", json!([1, 2, 3]), stored_at);

        let past_ttl = stored_at + cache.ttl() + Duration::seconds(1);
        assert!(cache.get_at("expiring", past_ttl).is_none());
        assert!(cache.is_empty(), "Expired entry should be removed on read");
    }

    #[test]
    fn test_entry_valid_exactly_at_ttl() {
        let cache = ResponseCache::new(Duration::seconds(60));
        let stored_at = Utc::now();

        cache.set_at("edge", json!(true), stored_at);

        let at_ttl = stored_at + Duration::seconds(60);
        assert_eq!(cache.get_at("edge", at_ttl), Some(json!(true)));
    }

    #[test]
    fn test_expired_entry_is_valid_again_after_set() {
        let cache = ResponseCache::new(Duration::seconds(10));
        let start = Utc::now();

        cache.set_at("key", json!(1), start);
        let later = start + Duration::seconds(11);
        assert!(cache.get_at("key", later).is_none());

        cache.set_at("key", json!(2), later);
        assert_eq!(cache.get_at("key", later), Some(json!(2)));
    }

    #[test]
    fn test_clear_removes_all_entries() {
        let cache = ResponseCache::default();
        cache.set("a", json!(1));
        cache.set("b", json!(2));

        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn test_default_ttl_is_five_minutes() {
        let cache = ResponseCache::default();
        assert_eq!(cache.ttl(), Duration::minutes(5));
    }

    #[tokio::test]
    async fn test_cached_request_skips_producer_on_hit() {
        let cache = ResponseCache::default();
        cache.set("profile_1", json!({"user_id": 1}));
        let calls = Cell::new(0);
        let counter = &calls;

        let result: Result<Value, String> = cache
            .cached_request("profile_1", move || async move {
                counter.set(counter.get() + 1);
                Ok(json!({"user_id": 2}))
            })
            .await;

        assert_eq!(result.unwrap(), json!({"user_id": 1}));
        assert_eq!(calls.get(), 0, "Producer should not run on a cache hit");
    }

    #[tokio::test]
    async fn test_cached_request_stores_result_on_miss() {
        let cache = ResponseCache::default();

        let result: Result<Value, String> = cache
            .cached_request("songs", || async { Ok(json!(["a", "b"])) })
            .await;

        assert_eq!(result.unwrap(), json!(["a", "b"]));
        assert_eq!(cache.get("songs"), Some(json!(["a", "b"])));
    }

    #[tokio::test]
    async fn test_cached_request_does_not_cache_errors() {
        let cache = ResponseCache::default();

        let result: Result<Value, String> = cache
            .cached_request("broken", || async { Err("backend down".to_string()) })
            .await;

        assert_eq!(result.unwrap_err(), "backend down");
        assert!(cache.get("broken").is_none());
    }
}
