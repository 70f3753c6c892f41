//! Configuration Module
//!
//! Handles loading and managing server configuration from environment
//! variables.

use std::env;
use std::path::PathBuf;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults for a local content site.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Directory holding the per-collection JSON files
    pub data_dir: PathBuf,
    /// Maximum number of entries the read-through cache can hold
    pub cache_max_entries: usize,
    /// Default TTL in seconds for cached reads
    pub cache_default_ttl: u64,
    /// Optional path for the cache snapshot file; unset disables persistence
    pub cache_snapshot_path: Option<PathBuf>,
    /// Background cleanup sweep interval in seconds
    pub cleanup_interval: u64,
    /// Attempt budget for the initial collection loads
    pub load_max_attempts: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATA_DIR` - Collection file directory (default: ./data)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_DEFAULT_TTL` - Cached-read TTL in seconds (default: 300)
    /// - `CACHE_SNAPSHOT_PATH` - Cache snapshot file (default: disabled)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 5)
    /// - `LOAD_MAX_ATTEMPTS` - Collection load attempts (default: 3)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            cache_default_ttl: env::var("CACHE_DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            cache_snapshot_path: env::var("CACHE_SNAPSHOT_PATH").ok().map(PathBuf::from),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            load_max_attempts: env::var("LOAD_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            data_dir: PathBuf::from("./data"),
            cache_max_entries: 1000,
            cache_default_ttl: 300,
            cache_snapshot_path: None,
            cleanup_interval: 5,
            load_max_attempts: 3,
        }
    }
}
