//! Key/value cache with per-entry TTL (Time To Live) and hit/miss statistics.
//!
//! Entries expire lazily: an expired entry is treated as a miss and removed on
//! the read that observes it. Counters are cumulative and survive `clear()`.

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// A cache entry with its expiry deadline.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_live(&self, now: Instant) -> bool {
        now <= self.expires_at
    }
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub current_size: usize,
}

/// A thread-safe cache where every entry carries its own TTL.
///
/// The cache can be cloned cheaply (uses Arc internally); clones share entries
/// and counters. It never fails: a poisoned lock degrades to "not found".
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use token_screener_mcp::cache::TtlCache;
///
/// let cache: TtlCache<String, u32> = TtlCache::new();
/// cache.set("answer".to_string(), 42, Duration::from_secs(60));
/// assert_eq!(cache.get(&"answer".to_string()), Some(42));
/// assert_eq!(cache.stats().hits, 1);
/// ```
#[derive(Clone)]
pub struct TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    sets: Arc<AtomicU64>,
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            sets: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Store a value that expires `ttl` from now.
    ///
    /// If a value with the same key already exists, it is replaced along with
    /// its deadline.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, entry);
        }
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a value if it exists and hasn't expired.
    ///
    /// Returns `None` if:
    /// - The key doesn't exist
    /// - The entry is past its deadline (the entry is also dropped)
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();

        let lookup = match self.entries.read() {
            Ok(entries) => entries.get(key).map(|entry| {
                if entry.is_live(now) {
                    Some(entry.value.clone())
                } else {
                    None
                }
            }),
            Err(_) => None,
        };

        match lookup {
            Some(Some(value)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            Some(None) => {
                self.evict_if_expired(key, now);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Check if a live entry exists. Counts as a lookup.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Remove a specific key from the cache.
    pub fn remove(&self, key: &K) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    /// Remove all entries. Counters are left untouched.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Remove all expired entries from the cache.
    ///
    /// Not required for correctness, since `get()` ignores expired entries,
    /// but frees memory held by keys that are never read again.
    pub fn cleanup_expired(&self) {
        let now = Instant::now();

        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|_, entry| entry.is_live(now));
        }
    }

    /// Get the number of stored entries (including expired ones not yet evicted).
    pub fn len(&self) -> usize {
        if let Ok(entries) = self.entries.read() {
            entries.len()
        } else {
            0
        }
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-only snapshot of the counters and current size.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            current_size: self.len(),
        }
    }

    // Re-checks under the write lock: a concurrent `set` may have refreshed it.
    fn evict_if_expired(&self, key: &K, now: Instant) {
        if let Ok(mut entries) = self.entries.write() {
            if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
                entries.remove(key);
            }
        }
    }
}

impl<K, V> std::fmt::Debug for TtlCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}
