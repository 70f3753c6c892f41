//! About Repository
//!
//! Biography content with the same flag-based primary record convention as
//! contact info, plus a timeline query for the history section.

use uuid::Uuid;

use crate::domain::{AboutContent, AboutDraft, AboutPatch, Record, TimelineEvent};
use crate::error::{Result, StoreError};
use crate::repository::Repository;

// == About Repository ==
pub struct AboutRepository {
    inner: Repository<AboutContent>,
}

impl AboutRepository {
    /// Wraps a configured generic repository.
    pub fn new(inner: Repository<AboutContent>) -> Self {
        Self { inner }
    }

    // == CRUD delegates ==
    pub async fn get_all(&self) -> Result<Vec<AboutContent>> {
        self.inner.get_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<AboutContent>> {
        self.inner.get_by_id(id).await
    }

    pub async fn create(&self, draft: AboutDraft) -> Result<AboutContent> {
        self.inner.create(draft).await
    }

    pub async fn update(&self, id: Uuid, patch: AboutPatch) -> Result<AboutContent> {
        self.inner.update(id, patch).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.inner.delete(id).await
    }

    // == Primary record ==
    /// The displayed about record, found by flag.
    pub async fn primary(&self) -> Result<AboutContent> {
        self.inner
            .snapshot()
            .await
            .into_iter()
            .find(|about| about.primary)
            .ok_or(StoreError::NotFound {
                kind: AboutContent::KIND,
                id: "primary".to_string(),
            })
    }

    /// Patches the primary record in place.
    pub async fn update_primary(&self, patch: AboutPatch) -> Result<AboutContent> {
        let current = self.primary().await?;
        self.inner.update(current.id(), patch).await
    }

    /// The primary record's timeline, most recent milestone first.
    pub async fn timeline(&self) -> Result<Vec<TimelineEvent>> {
        let mut events = self.primary().await?.timeline;
        events.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(events)
    }
}
