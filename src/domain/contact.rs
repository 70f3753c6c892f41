//! Contact entity
//!
//! How to reach the site owner. The collection usually holds a single
//! record; the one the site shows is the one with the `primary` flag set,
//! never "whichever came first".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validate::{check_url, require_text};
use crate::domain::Record;
use crate::error::FieldError;

// == Social Link ==
/// A labelled external profile link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Display label ("GitHub", "LinkedIn", ...)
    pub label: String,
    pub url: String,
}

fn validate_socials(socials: &[SocialLink]) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for (i, link) in socials.iter().enumerate() {
        errors.extend(require_text(&format!("socials[{}].label", i), &link.label, 40));
        errors.extend(check_url(&format!("socials[{}].url", i), &link.url));
    }
    errors
}

// == Contact Info ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub id: Uuid,
    pub email: String,
    pub location: Option<String>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    pub available_for_work: bool,
    /// The record the site displays. Exactly one record should carry this.
    pub primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// == Draft ==
/// Creation input for contact info.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactDraft {
    pub email: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    #[serde(default)]
    pub available_for_work: bool,
    #[serde(default)]
    pub primary: bool,
}

// == Patch ==
/// Partial update for contact info.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPatch {
    pub email: Option<String>,
    pub location: Option<Option<String>>,
    pub socials: Option<Vec<SocialLink>>,
    pub available_for_work: Option<bool>,
    pub primary: Option<bool>,
}

fn validate_email(email: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    errors.extend(require_text("email", email, 120));
    if errors.is_empty() && !email.contains('@') {
        errors.push(FieldError::new("email", "must be an email address"));
    }
    errors
}

impl Record for ContactInfo {
    type Draft = ContactDraft;
    type Patch = ContactPatch;

    const KIND: &'static str = "contact";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn validate_draft(draft: &ContactDraft) -> Vec<FieldError> {
        let mut errors = validate_email(&draft.email);
        errors.extend(validate_socials(&draft.socials));
        errors
    }

    fn validate_patch(patch: &ContactPatch) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(email) = &patch.email {
            errors.extend(validate_email(email));
        }
        if let Some(socials) = &patch.socials {
            errors.extend(validate_socials(socials));
        }
        errors
    }

    fn from_draft(id: Uuid, now: DateTime<Utc>, draft: ContactDraft) -> Self {
        Self {
            id,
            email: draft.email,
            location: draft.location,
            socials: draft.socials,
            available_for_work: draft.available_for_work,
            primary: draft.primary,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: ContactPatch, now: DateTime<Utc>) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(socials) = patch.socials {
            self.socials = socials;
        }
        if let Some(available) = patch.available_for_work {
            self.available_for_work = available;
        }
        if let Some(primary) = patch.primary {
            self.primary = primary;
        }
        self.updated_at = now;
    }
}
