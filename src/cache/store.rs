//! Cache Store Module
//!
//! Main cache engine: a bounded HashMap with per-entry TTL, least-recently-
//! used eviction, and optional snapshot persistence.
//!
//! No operation here returns an error. A missing, expired, or evicted key is
//! an ordinary `None`/`false` result, and persistence failures are handled
//! inside the snapshot store.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats, SnapshotStore};

// == Cache Store ==
/// Bounded, expiring key-value store with LRU eviction.
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Default TTL in seconds for entries without explicit TTL
    default_ttl: u64,
    /// Monotonic access counter backing LRU ordering
    ticks: u64,
    /// Optional durable backing for the entry map
    snapshot: Option<Box<dyn SnapshotStore<V>>>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a memory-only store with the given capacity and default TTL
    /// (seconds).
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            default_ttl,
            ticks: 0,
            snapshot: None,
        }
    }

    /// Creates a store backed by a snapshot file. Any snapshot on disk is
    /// restored immediately, minus entries that expired while it sat there.
    pub fn with_snapshot(
        max_entries: usize,
        default_ttl: u64,
        snapshot: Box<dyn SnapshotStore<V>>,
    ) -> Self {
        let entries = snapshot.restore();
        // Resume the access counter past any restored sequence numbers
        let ticks = entries.values().map(|e| e.access_seq).max().unwrap_or(0);
        Self {
            entries,
            max_entries,
            default_ttl,
            ticks,
            snapshot: Some(snapshot),
        }
    }

    // == Set ==
    /// Inserts or overwrites an entry with a fresh timestamp and TTL.
    ///
    /// When the store is at capacity the least-recently-accessed entry is
    /// evicted first — even when the incoming key overwrites an existing
    /// one. The configured capacity is a hard bound, not a hint.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<u64>) {
        let key = key.into();

        if self.entries.len() >= self.max_entries {
            self.evict_lru();
        }

        let seq = self.next_tick();
        let ttl_seconds = ttl.unwrap_or(self.default_ttl);
        self.entries.insert(key, CacheEntry::new(value, ttl_seconds, seq));
        self.persist();
    }

    // == Get ==
    /// Returns the value for `key`, or `None` if the key was never set, has
    /// expired, or was evicted.
    ///
    /// A hit bumps the entry's hit counter and marks it most recently used.
    /// An expired entry observed here is removed on the spot.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => return None,
        };

        if expired {
            self.entries.remove(key);
            return None;
        }

        let seq = self.next_tick();
        let entry = self.entries.get_mut(key)?;
        entry.touch(seq);
        Some(entry.value.clone())
    }

    // == Has ==
    /// Whether `key` currently resolves to a live value. Defined as
    /// `get(key).is_some()`, so it shares the expiry check and hit
    /// bookkeeping with `get`.
    pub fn has(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Delete ==
    /// Removes an entry. Returns whether a removal actually occurred.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.persist();
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Empties the store unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    // == Stats ==
    /// Snapshot statistics over the current in-memory entry set. Expired
    /// entries that have not been swept yet count in `size` and are
    /// reported separately as `expired_count`.
    pub fn stats(&self) -> CacheStats {
        let now = current_timestamp_ms();
        let size = self.entries.len();
        let total_age: u64 = self.entries.values().map(|e| e.age_ms(now)).sum();

        CacheStats {
            size,
            max_size: self.max_entries,
            total_hits: self.entries.values().map(|e| e.hits).sum(),
            expired_count: self.entries.values().filter(|e| e.is_expired()).count(),
            average_age_ms: if size == 0 {
                0.0
            } else {
                total_age as f64 / size as f64
            },
        }
    }

    // == Cleanup Expired ==
    /// Removes all entries past their own TTL. This is the body of the
    /// periodic sweep; it bounds memory for keys that are set but never
    /// read again, since `get` only removes what it observes.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in &expired_keys {
            self.entries.remove(key);
        }

        if count > 0 {
            self.persist();
        }
        count
    }

    // == Length ==
    /// Returns the current number of entries (expired-but-unswept included).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Eviction ==
    /// Removes the single least-recently-accessed entry. O(n) scan over the
    /// entry set; the store is bounded and local, so n stays small.
    fn evict_lru(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.access_seq)
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            self.entries.remove(&key);
            debug!("Evicted least recently used cache entry '{}'", key);
        }
    }

    fn next_tick(&mut self) -> u64 {
        self.ticks += 1;
        self.ticks
    }

    fn persist(&self) {
        if let Some(snapshot) = &self.snapshot {
            snapshot.persist(&self.entries);
        }
    }
}
