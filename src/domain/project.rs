//! Project entity
//!
//! A portfolio project: what was built, with what, and where to find it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validate::{check_url, check_year, require_text};
use crate::domain::Record;
use crate::error::FieldError;

const MAX_TITLE_LEN: usize = 120;
const MAX_DESCRIPTION_LEN: usize = 2000;

// == Project Links ==
/// External links attached to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLinks {
    /// Source repository URL
    pub repository: Option<String>,
    /// Live demo URL
    pub demo: Option<String>,
}

impl ProjectLinks {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(url) = &self.repository {
            errors.extend(check_url("links.repository", url));
        }
        if let Some(url) = &self.demo {
            errors.extend(check_url("links.demo", url));
        }
        errors
    }
}

// == Project ==
/// A single portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Free-form grouping label ("web", "embedded", ...)
    pub category: String,
    /// Technologies the project was built with
    pub technologies: Vec<String>,
    pub links: ProjectLinks,
    /// Year the project shipped
    pub year: i32,
    /// Shown on the landing section when true
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Case-insensitive substring match over the technology list.
    pub fn uses_technology(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.technologies
            .iter()
            .any(|tech| tech.to_lowercase().contains(&query))
    }

    /// Case-insensitive substring match over title and description.
    pub fn matches_text(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

// == Draft ==
/// Creation input for a project.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub links: ProjectLinks,
    pub year: i32,
    #[serde(default)]
    pub featured: bool,
}

// == Patch ==
/// Partial update for a project. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub links: Option<ProjectLinks>,
    pub year: Option<i32>,
    pub featured: Option<bool>,
}

impl Record for Project {
    type Draft = ProjectDraft;
    type Patch = ProjectPatch;

    const KIND: &'static str = "project";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn validate_draft(draft: &ProjectDraft) -> Vec<FieldError> {
        let mut errors = Vec::new();
        errors.extend(require_text("title", &draft.title, MAX_TITLE_LEN));
        errors.extend(require_text(
            "description",
            &draft.description,
            MAX_DESCRIPTION_LEN,
        ));
        errors.extend(require_text("category", &draft.category, 60));
        for (i, tech) in draft.technologies.iter().enumerate() {
            errors.extend(require_text(&format!("technologies[{}]", i), tech, 60));
        }
        errors.extend(draft.links.validate());
        errors.extend(check_year("year", draft.year));
        errors
    }

    fn validate_patch(patch: &ProjectPatch) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(title) = &patch.title {
            errors.extend(require_text("title", title, MAX_TITLE_LEN));
        }
        if let Some(description) = &patch.description {
            errors.extend(require_text("description", description, MAX_DESCRIPTION_LEN));
        }
        if let Some(category) = &patch.category {
            errors.extend(require_text("category", category, 60));
        }
        if let Some(technologies) = &patch.technologies {
            for (i, tech) in technologies.iter().enumerate() {
                errors.extend(require_text(&format!("technologies[{}]", i), tech, 60));
            }
        }
        if let Some(links) = &patch.links {
            errors.extend(links.validate());
        }
        if let Some(year) = patch.year {
            errors.extend(check_year("year", year));
        }
        errors
    }

    fn from_draft(id: Uuid, now: DateTime<Utc>, draft: ProjectDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            technologies: draft.technologies,
            links: draft.links,
            year: draft.year,
            featured: draft.featured,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: ProjectPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(technologies) = patch.technologies {
            self.technologies = technologies;
        }
        if let Some(links) = patch.links {
            self.links = links;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        self.updated_at = now;
    }
}
