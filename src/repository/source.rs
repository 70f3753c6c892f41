//! Data Source Collaborators
//!
//! The repository's seam to wherever records actually come from. The
//! repository never cares whether that is a fixed in-memory seed, a JSON
//! file, or something remote; it only sees `load` and `save`.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

// == Data Source Trait ==
/// Backing storage for one entity collection.
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    /// Returns the full collection. Implementations should reserve errors
    /// for genuinely transient conditions — the repository retries a few
    /// times, then settles on an empty collection.
    async fn load(&self) -> anyhow::Result<Vec<T>>;

    /// Persists the full collection. Best-effort; failures propagate so the
    /// calling mutation can report them.
    async fn save(&self, records: &[T]) -> anyhow::Result<()>;
}

// == Static Source ==
/// A fixed in-memory collection — the static content arrays a portfolio
/// ships with. Saving is a no-op; there is nowhere for it to go.
pub struct StaticSource<T> {
    records: Vec<T>,
}

impl<T> StaticSource<T> {
    /// Creates a source serving exactly `records`.
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }
}

impl<T> Default for StaticSource<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl<T> DataSource<T> for StaticSource<T>
where
    T: Clone + Send + Sync,
{
    async fn load(&self) -> anyhow::Result<Vec<T>> {
        Ok(self.records.clone())
    }

    async fn save(&self, _records: &[T]) -> anyhow::Result<()> {
        Ok(())
    }
}

// == JSON File Source ==
/// A collection stored as a single JSON array on local disk. A missing file
/// is an empty collection, not an error; a fresh deployment starts blank.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading and writing `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl<T> DataSource<T> for JsonFileSource
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self) -> anyhow::Result<Vec<T>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    "No collection file at {}, starting empty",
                    self.path.display()
                );
                Ok(Vec::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, records: &[T]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let payload = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, payload).await?;
        Ok(())
    }
}
