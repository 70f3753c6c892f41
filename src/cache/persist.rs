//! Cache Persistence Module
//!
//! Optional snapshotting of the full entry map to a local JSON file. The
//! store writes a snapshot after every mutating operation and restores one
//! at construction.
//!
//! Persistence is strictly best-effort: every failure mode (I/O,
//! serialization) is logged and swallowed, and the store degrades to
//! memory-only. A cache miss is always a legal outcome.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::entry::CacheEntry;

// == Snapshot Store Trait ==
/// Durable backing for the cache's entry map.
///
/// Implementations must never propagate errors; the cache has no error
/// surface to report them through.
pub trait SnapshotStore<V>: Send + Sync {
    /// Writes the full entry map. Failures are logged and swallowed.
    fn persist(&self, entries: &HashMap<String, CacheEntry<V>>);

    /// Reads back the entry map, dropping entries already expired.
    /// Returns an empty map when no snapshot exists or it cannot be read.
    fn restore(&self) -> HashMap<String, CacheEntry<V>>;
}

// == JSON File Snapshot ==
/// Snapshot store backed by a single JSON file on local disk.
pub struct JsonSnapshot {
    path: PathBuf,
}

impl JsonSnapshot {
    /// Creates a snapshot store writing to `path`. The file and its parent
    /// directory are created lazily on first persist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl<V> SnapshotStore<V> for JsonSnapshot
where
    V: Serialize + DeserializeOwned + Send + Sync,
{
    fn persist(&self, entries: &HashMap<String, CacheEntry<V>>) {
        let payload = match serde_json::to_vec(entries) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("Cache snapshot serialization failed: {}", err);
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = fs::create_dir_all(parent) {
                    warn!("Cache snapshot directory unavailable: {}", err);
                    return;
                }
            }
        }

        if let Err(err) = fs::write(&self.path, payload) {
            warn!(
                "Cache snapshot write to {} failed: {}",
                self.path.display(),
                err
            );
        }
    }

    fn restore(&self) -> HashMap<String, CacheEntry<V>> {
        let payload = match fs::read(&self.path) {
            Ok(payload) => payload,
            Err(err) => {
                debug!(
                    "No cache snapshot at {} ({}), starting empty",
                    self.path.display(),
                    err
                );
                return HashMap::new();
            }
        };

        let mut entries: HashMap<String, CacheEntry<V>> = match serde_json::from_slice(&payload) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Cache snapshot at {} unreadable: {}", self.path.display(), err);
                return HashMap::new();
            }
        };

        // Entries that expired while the snapshot sat on disk are dead weight
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        if entries.len() < before {
            debug!(
                "Dropped {} expired entries while restoring cache snapshot",
                before - entries.len()
            );
        }

        entries
    }
}
