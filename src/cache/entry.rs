//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL and access
//! bookkeeping.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A single cache entry: the stored value plus the metadata the store needs
/// for expiry and least-recently-used eviction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Number of times this entry has been read
    pub hits: u64,
    /// Last read or insertion timestamp (Unix milliseconds)
    pub last_accessed: u64,
    /// Store-assigned access sequence number. Millisecond timestamps tie
    /// under rapid insertion; the sequence gives eviction a total order.
    pub access_seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` from now.
    ///
    /// The entry starts with zero hits and counts as accessed at insertion
    /// time, so an entry that is never read is the eviction candidate in
    /// insertion order.
    pub fn new(value: V, ttl_seconds: u64, access_seq: u64) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl_seconds * 1000,
            hits: 0,
            last_accessed: now,
            access_seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to the expiration time. Expiry is lazy — an
    /// expired entry may still be physically present until a read or the
    /// cleanup sweep observes it.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Touch ==
    /// Records a read: bumps the hit counter, refreshes the last-accessed
    /// timestamp, and takes the given access sequence number. Does not
    /// extend the TTL.
    pub fn touch(&mut self, access_seq: u64) {
        self.hits += 1;
        self.last_accessed = current_timestamp_ms();
        self.access_seq = access_seq;
    }

    // == Age ==
    /// Returns the entry's age in milliseconds relative to `now_ms`.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
