//! Generic Repository
//!
//! Uniform async CRUD over one entity collection, decoupling callers from
//! how records are populated. Concrete repositories wrap this with their
//! domain queries.
//!
//! Lifecycle per instance: Unloaded → Loading → Loaded. The first public
//! call triggers the load (with bounded retry); a load that still fails
//! resolves to Loaded-with-empty-collection, logged and never retried. All
//! public methods await that transition before touching the collection.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::CacheStore;
use crate::domain::Record;
use crate::error::{Result, StoreError};
use crate::loader::{with_retry, RetryPolicy};
use crate::repository::DataSource;

// == Shared Cache ==
/// Handle to the application-wide read-through cache. Values are stored as
/// JSON so one cache serves every entity type.
pub type SharedCache = Arc<RwLock<CacheStore<serde_json::Value>>>;

/// Read-through caching configuration for one repository.
#[derive(Clone)]
pub struct CachePolicy {
    /// The shared store to read through
    pub cache: SharedCache,
    /// Per-repository TTL for cached reads, in seconds
    pub ttl_seconds: u64,
}

// == Repository ==
/// Generic CRUD repository over a lazily loaded entity collection.
pub struct Repository<T: Record> {
    source: Arc<dyn DataSource<T>>,
    records: RwLock<Vec<T>>,
    loaded: OnceCell<()>,
    retry: RetryPolicy,
    cache: Option<CachePolicy>,
}

impl<T: Record> Repository<T> {
    // == Constructor ==
    /// Creates a repository over `source` with default retry pacing and no
    /// read-through cache.
    pub fn new(source: Arc<dyn DataSource<T>>) -> Self {
        Self {
            source,
            records: RwLock::new(Vec::new()),
            loaded: OnceCell::new(),
            retry: RetryPolicy::default(),
            cache: None,
        }
    }

    /// Replaces the load retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Enables the read-through cache on `get_all`/`get_by_id`.
    pub fn with_cache(mut self, policy: CachePolicy) -> Self {
        self.cache = Some(policy);
        self
    }

    // == Ensure Loaded ==
    /// Awaits the Unloaded → Loaded transition, performing the load exactly
    /// once across concurrent callers.
    async fn ensure_loaded(&self) {
        self.loaded
            .get_or_init(|| async {
                debug!("Loading {} collection", T::KIND);
                let label = format!("{} load", T::KIND);
                match with_retry(&label, &self.retry, || self.source.load()).await {
                    Ok(loaded) => {
                        info!("Loaded {} {} record(s)", loaded.len(), T::KIND);
                        *self.records.write().await = loaded;
                    }
                    Err(err) => {
                        warn!(
                            "{} collection failed to load, continuing with empty collection: {}",
                            T::KIND,
                            err
                        );
                    }
                }
            })
            .await;
    }

    // == Get All ==
    /// Returns the full loaded collection, through the cache when one is
    /// configured.
    pub async fn get_all(&self) -> Result<Vec<T>> {
        self.ensure_loaded().await;

        let key = Self::all_key();
        if let Some(policy) = &self.cache {
            if let Some(value) = policy.cache.write().await.get(&key) {
                match serde_json::from_value::<Vec<T>>(value) {
                    Ok(records) => {
                        debug!("{} get_all served from cache", T::KIND);
                        return Ok(records);
                    }
                    Err(err) => warn!("Discarding unreadable cache entry '{}': {}", key, err),
                }
            }
        }

        let records = self.records.read().await.clone();
        self.cache_put(&key, serde_json::to_value(&records)).await;
        Ok(records)
    }

    // == Get By Id ==
    /// Linear scan by identifier. `Ok(None)` when absent — a missing id is
    /// an ordinary outcome here, not an error. Cached misses are cached too.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<T>> {
        self.ensure_loaded().await;

        let key = Self::id_key(id);
        if let Some(policy) = &self.cache {
            if let Some(value) = policy.cache.write().await.get(&key) {
                match serde_json::from_value::<Option<T>>(value) {
                    Ok(found) => {
                        debug!("{} get_by_id served from cache", T::KIND);
                        return Ok(found);
                    }
                    Err(err) => warn!("Discarding unreadable cache entry '{}': {}", key, err),
                }
            }
        }

        let found = self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned();
        self.cache_put(&key, serde_json::to_value(&found)).await;
        Ok(found)
    }

    // == Create ==
    /// Validates the draft, derives identity and timestamps, appends, and
    /// persists. Validation failure returns structured field errors and
    /// leaves the collection untouched.
    pub async fn create(&self, draft: T::Draft) -> Result<T> {
        self.ensure_loaded().await;

        let errors = T::validate_draft(&draft);
        if !errors.is_empty() {
            return Err(StoreError::Validation {
                kind: T::KIND,
                errors,
            });
        }

        let record = T::from_draft(Uuid::new_v4(), Utc::now(), draft);
        let save_result = {
            let mut records = self.records.write().await;
            records.push(record.clone());
            self.save(records.as_slice(), "create").await
        };

        // The in-memory collection changed either way
        self.invalidate(record.id()).await;
        save_result?;

        info!("Created {} {}", T::KIND, record.id());
        Ok(record)
    }

    // == Update ==
    /// Validates the patch, merges it onto the existing record, bumps
    /// `updated_at`, persists. An unknown id is a not-found error.
    pub async fn update(&self, id: Uuid, patch: T::Patch) -> Result<T> {
        self.ensure_loaded().await;

        let errors = T::validate_patch(&patch);
        if !errors.is_empty() {
            return Err(StoreError::Validation {
                kind: T::KIND,
                errors,
            });
        }

        let (updated, save_result) = {
            let mut records = self.records.write().await;
            let Some(record) = records.iter_mut().find(|record| record.id() == id) else {
                return Err(StoreError::NotFound {
                    kind: T::KIND,
                    id: id.to_string(),
                });
            };

            record.apply_patch(patch, Utc::now());
            let updated = record.clone();
            let save_result = self.save(records.as_slice(), "update").await;
            (updated, save_result)
        };

        self.invalidate(id).await;
        save_result?;

        info!("Updated {} {}", T::KIND, id);
        Ok(updated)
    }

    // == Delete ==
    /// Removes a record. An unknown id is a not-found error, never silently
    /// ignored.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.ensure_loaded().await;

        let save_result = {
            let mut records = self.records.write().await;
            let before = records.len();
            records.retain(|record| record.id() != id);
            if records.len() == before {
                return Err(StoreError::NotFound {
                    kind: T::KIND,
                    id: id.to_string(),
                });
            }
            self.save(records.as_slice(), "delete").await
        };

        self.invalidate(id).await;
        save_result?;

        info!("Deleted {} {}", T::KIND, id);
        Ok(())
    }

    // == Snapshot ==
    /// Clone of the loaded collection for domain queries: bypasses the
    /// cache, never reloads, never mutates.
    pub async fn snapshot(&self) -> Vec<T> {
        self.ensure_loaded().await;
        self.records.read().await.clone()
    }

    // == Internals ==
    async fn save(&self, records: &[T], operation: &'static str) -> Result<()> {
        self.source.save(records).await.map_err(|err| {
            warn!("Persisting {} after {} failed: {}", T::KIND, operation, err);
            StoreError::Persistence {
                kind: T::KIND,
                operation,
                message: err.to_string(),
            }
        })
    }

    async fn cache_put(&self, key: &str, value: serde_json::Result<serde_json::Value>) {
        let Some(policy) = &self.cache else { return };
        match value {
            Ok(value) => {
                policy
                    .cache
                    .write()
                    .await
                    .set(key, value, Some(policy.ttl_seconds));
            }
            Err(err) => warn!("Not caching '{}': {}", key, err),
        }
    }

    /// Drops this repository's cache keys after a mutation. The repository
    /// owns its keys, so staleness windows never outlive a write.
    async fn invalidate(&self, id: Uuid) {
        if let Some(policy) = &self.cache {
            let mut cache = policy.cache.write().await;
            cache.delete(&Self::all_key());
            cache.delete(&Self::id_key(id));
        }
    }

    fn all_key() -> String {
        format!("{}:all", T::KIND)
    }

    fn id_key(id: Uuid) -> String {
        format!("{}:{}", T::KIND, id)
    }
}
