//! Technology entity
//!
//! A skill listed on the site, with a self-assessed proficiency level.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validate::{check_range, require_text};
use crate::domain::Record;
use crate::error::FieldError;

/// Proficiency scale bounds (1 = familiar, 5 = expert).
pub const MIN_PROFICIENCY: u8 = 1;
pub const MAX_PROFICIENCY: u8 = 5;

// == Technology ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technology {
    pub id: Uuid,
    pub name: String,
    /// Grouping label ("language", "framework", "tooling", ...)
    pub category: String,
    /// 1..=5 self-assessment
    pub proficiency: u8,
    /// Whole years of use
    pub years_used: u8,
    /// Shown in the skills summary when true
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// == Draft ==
/// Creation input for a technology.
#[derive(Debug, Clone, Deserialize)]
pub struct TechnologyDraft {
    pub name: String,
    pub category: String,
    pub proficiency: u8,
    #[serde(default)]
    pub years_used: u8,
    #[serde(default)]
    pub featured: bool,
}

// == Patch ==
/// Partial update for a technology.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TechnologyPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub proficiency: Option<u8>,
    pub years_used: Option<u8>,
    pub featured: Option<bool>,
}

impl Record for Technology {
    type Draft = TechnologyDraft;
    type Patch = TechnologyPatch;

    const KIND: &'static str = "technology";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn validate_draft(draft: &TechnologyDraft) -> Vec<FieldError> {
        let mut errors = Vec::new();
        errors.extend(require_text("name", &draft.name, 60));
        errors.extend(require_text("category", &draft.category, 60));
        errors.extend(check_range(
            "proficiency",
            draft.proficiency,
            MIN_PROFICIENCY,
            MAX_PROFICIENCY,
        ));
        errors
    }

    fn validate_patch(patch: &TechnologyPatch) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(name) = &patch.name {
            errors.extend(require_text("name", name, 60));
        }
        if let Some(category) = &patch.category {
            errors.extend(require_text("category", category, 60));
        }
        if let Some(proficiency) = patch.proficiency {
            errors.extend(check_range(
                "proficiency",
                proficiency,
                MIN_PROFICIENCY,
                MAX_PROFICIENCY,
            ));
        }
        errors
    }

    fn from_draft(id: Uuid, now: DateTime<Utc>, draft: TechnologyDraft) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            proficiency: draft.proficiency,
            years_used: draft.years_used,
            featured: draft.featured,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: TechnologyPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(proficiency) = patch.proficiency {
            self.proficiency = proficiency;
        }
        if let Some(years_used) = patch.years_used {
            self.years_used = years_used;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        self.updated_at = now;
    }
}
