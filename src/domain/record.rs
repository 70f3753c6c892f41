//! Record Trait
//!
//! The seam between the generic repository and the concrete entities. Every
//! content record carries an opaque identifier and a creation/last-updated
//! timestamp pair; construction and patch application live here so the
//! repository never touches concrete fields.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::FieldError;

// == Record ==
/// A content entity manageable by the generic repository.
///
/// Invariants the implementations uphold:
/// - identifiers are unique within a repository's collection (the
///   repository derives them, entities never pick their own);
/// - `updated_at >= created_at` after any mutation (`apply_patch` stamps
///   `updated_at` with the mutation time).
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Creation input: everything a new record needs except identity and
    /// timestamps.
    type Draft: Send + Sync;

    /// Partial update input: every field optional, absent means unchanged.
    type Patch: Send + Sync;

    /// Lowercase noun used in log lines, cache keys, and error payloads.
    const KIND: &'static str;

    /// The record's identifier.
    fn id(&self) -> Uuid;

    /// Creation timestamp.
    fn created_at(&self) -> DateTime<Utc>;

    /// Last-updated timestamp.
    fn updated_at(&self) -> DateTime<Utc>;

    /// Validates a creation input. An empty vec means valid.
    fn validate_draft(draft: &Self::Draft) -> Vec<FieldError>;

    /// Validates a partial update. Absent fields are not checked.
    fn validate_patch(patch: &Self::Patch) -> Vec<FieldError>;

    /// Builds a record from a validated draft with repository-derived
    /// identity and timestamps.
    fn from_draft(id: Uuid, now: DateTime<Utc>, draft: Self::Draft) -> Self;

    /// Merges a validated patch onto the record and stamps `updated_at`.
    fn apply_patch(&mut self, patch: Self::Patch, now: DateTime<Utc>);
}
