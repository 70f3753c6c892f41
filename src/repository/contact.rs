//! Contact Repository
//!
//! The site shows one contact record: the one flagged `primary`. Lookup is
//! by flag, never by position in the collection.

use uuid::Uuid;

use crate::domain::{ContactDraft, ContactInfo, ContactPatch, Record};
use crate::error::{Result, StoreError};
use crate::repository::Repository;

// == Contact Repository ==
pub struct ContactRepository {
    inner: Repository<ContactInfo>,
}

impl ContactRepository {
    /// Wraps a configured generic repository.
    pub fn new(inner: Repository<ContactInfo>) -> Self {
        Self { inner }
    }

    // == CRUD delegates ==
    pub async fn get_all(&self) -> Result<Vec<ContactInfo>> {
        self.inner.get_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ContactInfo>> {
        self.inner.get_by_id(id).await
    }

    pub async fn create(&self, draft: ContactDraft) -> Result<ContactInfo> {
        self.inner.create(draft).await
    }

    pub async fn update(&self, id: Uuid, patch: ContactPatch) -> Result<ContactInfo> {
        self.inner.update(id, patch).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.inner.delete(id).await
    }

    // == Primary record ==
    /// The displayed contact record. Absent when nothing carries the flag —
    /// reported as not-found with the sentinel id "primary".
    pub async fn primary(&self) -> Result<ContactInfo> {
        self.inner
            .snapshot()
            .await
            .into_iter()
            .find(|contact| contact.primary)
            .ok_or(StoreError::NotFound {
                kind: ContactInfo::KIND,
                id: "primary".to_string(),
            })
    }

    /// Patches the primary record in place.
    pub async fn update_primary(&self, patch: ContactPatch) -> Result<ContactInfo> {
        let current = self.primary().await?;
        self.inner.update(current.id(), patch).await
    }
}
