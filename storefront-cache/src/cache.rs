//! TTL cache implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::CacheConfig;
use crate::entry::CacheEntry;
use crate::stats::CacheStats;

#[derive(Debug)]
pub(crate) struct CacheInner {
    pub(crate) config: CacheConfig,
    pub(crate) entries: DashMap<String, CacheEntry>,
    write_seq: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// In-memory TTL cache with capacity-bounded, oldest-write-first eviction.
///
/// Values are serialized to JSON bytes on write and deserialized on read.
/// Cloning the cache is cheap and shares the same underlying store, so a
/// single instance can be handed to several consumers.
///
/// None of the operations return errors: any internal fault (for example a
/// value that cannot be serialized) is logged and degrades to a no-op or a
/// miss. The cache must never take its caller down.
#[derive(Debug, Clone)]
pub struct TtlCache {
    pub(crate) inner: Arc<CacheInner>,
}

impl TtlCache {
    /// Creates a cache with the given configuration.
    ///
    /// The background sweeper is not started automatically; call
    /// [`start_sweeper`](TtlCache::start_sweeper) once a runtime is available.
    pub fn new(config: CacheConfig) -> Self {
        TtlCache {
            inner: Arc::new(CacheInner {
                config,
                entries: DashMap::new(),
                write_seq: AtomicU64::new(0),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            }),
        }
    }

    /// Reads a value, deserializing it into `T`.
    ///
    /// Returns `None` if the key was never set, was deleted, has expired,
    /// or the stored bytes no longer decode as `T`. Expired and undecodable
    /// entries are removed on the way out and count as misses.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = match self.inner.entries.get(key) {
            Some(entry) => entry.clone(),
            None => {
                self.inner.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        if entry.is_expired(Utc::now()) {
            self.inner.entries.remove(key);
            self.inner.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        match serde_json::from_slice(entry.value()) {
            Ok(value) => {
                self.inner.hits.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            Err(error) => {
                warn!(key, %error, "cached value failed to deserialize, dropping entry");
                self.inner.entries.remove(key);
                self.inner.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Writes a value with an explicit TTL.
    ///
    /// Overwrites any existing entry and resets its expiry and write order.
    /// Returns `false` (without touching the store) if the value cannot be
    /// serialized.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> bool {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => Bytes::from(bytes),
            Err(error) => {
                warn!(key, %error, "value failed to serialize, skipping cache write");
                return false;
            }
        };

        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .unwrap_or(chrono::DateTime::<Utc>::MAX_UTC);
        let seq = self.inner.write_seq.fetch_add(1, Ordering::Relaxed);
        let entry = CacheEntry::new(bytes, expires_at, seq);

        self.inner.entries.insert(key.to_string(), entry);
        self.enforce_capacity();
        true
    }

    /// Writes a value with the configured default TTL.
    pub fn set_default<T: Serialize>(&self, key: &str, value: &T) -> bool {
        self.set(key, value, self.inner.config.default_ttl)
    }

    /// Removes a key. Returns the number of entries removed (0 or 1).
    pub fn delete(&self, key: &str) -> usize {
        match self.inner.entries.remove(key) {
            Some(_) => 1,
            None => 0,
        }
    }

    /// Removes every key containing the given substring.
    ///
    /// Linear scan over all keys. Returns the number of entries removed.
    pub fn delete_by_pattern(&self, pattern: &str) -> usize {
        let before = self.inner.entries.len();
        self.inner.entries.retain(|key, _| !key.contains(pattern));
        let removed = before.saturating_sub(self.inner.entries.len());
        if removed > 0 {
            debug!(pattern, removed, "invalidated cache entries by pattern");
        }
        removed
    }

    /// Removes all entries. Hit/miss counters are kept.
    pub fn clear(&self) {
        self.inner.entries.clear();
    }

    /// Returns a point-in-time statistics snapshot.
    pub fn stats(&self) -> CacheStats {
        let mut approx_key_bytes = 0;
        let mut approx_value_bytes = 0;
        for entry in self.inner.entries.iter() {
            approx_key_bytes += entry.key().len();
            approx_value_bytes += entry.value().memory_size();
        }
        CacheStats {
            entry_count: self.inner.entries.len(),
            hit_count: self.inner.hits.load(Ordering::Relaxed),
            miss_count: self.inner.misses.load(Ordering::Relaxed),
            approx_key_bytes,
            approx_value_bytes,
        }
    }

    /// Removes every expired entry. Returns the number removed.
    ///
    /// Called by the background sweeper; exposed for callers that manage
    /// their own schedule.
    pub fn remove_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.inner.entries.len();
        self.inner.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.inner.entries.len())
    }

    /// Evicts oldest-write-first until the entry count fits the cap.
    fn enforce_capacity(&self) {
        let max_entries = self.inner.config.max_entries;
        while self.inner.entries.len() > max_entries {
            let oldest = self
                .inner
                .entries
                .iter()
                .min_by_key(|entry| entry.value().seq())
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    debug!(key = %key, "evicting oldest cache entry over capacity");
                    self.inner.entries.remove(&key);
                }
                // Concurrent removals can empty the map under us.
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn small_cache(max_entries: usize) -> TtlCache {
        TtlCache::new(CacheConfig {
            max_entries,
            ..CacheConfig::default()
        })
    }

    #[test]
    fn test_set_then_get() {
        let cache = small_cache(10);
        assert!(cache.set("k", &"value", Duration::from_secs(60)));
        assert_eq!(cache.get::<String>("k").as_deref(), Some("value"));
    }

    #[test]
    fn test_delete_counts() {
        let cache = small_cache(10);
        cache.set_default("k", &1u32);
        assert_eq!(cache.delete("k"), 1);
        assert_eq!(cache.delete("k"), 0);
        assert_eq!(cache.get::<u32>("k"), None);
    }

    #[test]
    fn test_delete_by_pattern_is_exact() {
        let cache = small_cache(10);
        cache.set_default("order:1", &1u32);
        cache.set_default("order:2", &2u32);
        cache.set_default("products:page=1", &3u32);
        assert_eq!(cache.delete_by_pattern("order"), 2);
        assert_eq!(cache.get::<u32>("order:1"), None);
        assert_eq!(cache.get::<u32>("products:page=1"), Some(3));
    }

    #[test]
    fn test_capacity_evicts_oldest_write_first() {
        let cache = small_cache(2);
        cache.set_default("a", &1u32);
        cache.set_default("b", &2u32);
        // Rewriting "a" makes it the newest entry.
        cache.set_default("a", &10u32);
        cache.set_default("c", &3u32);
        assert_eq!(cache.get::<u32>("b"), None);
        assert_eq!(cache.get::<u32>("a"), Some(10));
        assert_eq!(cache.get::<u32>("c"), Some(3));
    }

    #[test]
    fn test_unserializable_value_degrades_to_noop() {
        let cache = small_cache(10);
        // serde_json cannot serialize maps with non-string keys.
        let bad: HashMap<(u32, u32), u32> = HashMap::from([((1, 2), 3)]);
        assert!(!cache.set("bad", &bad, Duration::from_secs(60)));
        assert_eq!(cache.stats().entry_count, 0);
    }

    #[test]
    fn test_type_confusion_degrades_to_miss() {
        let cache = small_cache(10);
        cache.set_default("k", &"not a number");
        assert_eq!(cache.get::<u64>("k"), None);
        // The undecodable entry was dropped.
        assert_eq!(cache.stats().entry_count, 0);
    }

    #[test]
    fn test_stats_counts_hits_misses_and_bytes() {
        let cache = small_cache(10);
        cache.set_default("key", &"abc");
        let _: Option<String> = cache.get("key");
        let _: Option<String> = cache.get("absent");
        let stats = cache.stats();
        assert_eq!(stats.entry_count, 1);
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 1);
        assert_eq!(stats.approx_key_bytes, 3);
        // Entry overhead plus "abc" serialized as "\"abc\"".
        assert_eq!(
            stats.approx_value_bytes,
            std::mem::size_of::<CacheEntry>() + 5
        );
    }

    #[test]
    fn test_clear_removes_everything() {
        let cache = small_cache(10);
        cache.set_default("a", &1u32);
        cache.set_default("b", &2u32);
        cache.clear();
        assert_eq!(cache.stats().entry_count, 0);
        assert_eq!(cache.get::<u32>("a"), None);
    }

    #[test]
    fn test_expired_entry_is_absent_and_removed() {
        let cache = small_cache(10);
        cache.set("k", &1u32, Duration::ZERO);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get::<u32>("k"), None);
        assert_eq!(cache.stats().entry_count, 0);
    }

    #[test]
    fn test_overwrite_resets_expiry() {
        let cache = small_cache(10);
        cache.set("k", &1u32, Duration::ZERO);
        cache.set("k", &2u32, Duration::from_secs(60));
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get::<u32>("k"), Some(2));
    }

    #[test]
    fn test_remove_expired_sweeps_only_expired() {
        let cache = small_cache(10);
        cache.set("dead", &1u32, Duration::ZERO);
        cache.set("live", &2u32, Duration::from_secs(60));
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.remove_expired(), 1);
        assert_eq!(cache.stats().entry_count, 1);
        assert_eq!(cache.get::<u32>("live"), Some(2));
    }
}
