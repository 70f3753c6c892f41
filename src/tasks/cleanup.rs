//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries. Reads
//! only remove the expired entries they happen to observe; this sweep is
//! what bounds memory for keys that are set and never read again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The task loops forever, sleeping for the configured interval between
/// sweeps and taking the cache write lock only for the sweep itself.
///
/// # Arguments
/// * `cache` - Shared handle to the cache store
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle used to abort the task during graceful shutdown.
pub fn spawn_cleanup_task<V>(
    cache: Arc<RwLock<CacheStore<V>>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            // Acquire write lock and sweep expired entries
            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup_expired()
            };

            // Log sweep results
            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
