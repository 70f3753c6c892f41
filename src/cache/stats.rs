//! Cache Statistics Module
//!
//! Snapshot of the store's current state, computed on demand.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time statistics over the in-memory entry set.
///
/// Expired entries that have not yet been swept still count towards `size`
/// and are reported separately as `expired_count`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Current number of entries (including expired-but-unswept ones)
    pub size: usize,
    /// Configured capacity
    pub max_size: usize,
    /// Sum of per-entry hit counters over the current entry set
    pub total_hits: u64,
    /// Entries past their TTL that have not been physically removed yet
    pub expired_count: usize,
    /// Mean entry age in milliseconds
    pub average_age_ms: f64,
}
