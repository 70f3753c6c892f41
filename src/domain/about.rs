//! About entity
//!
//! Biography content: headline, bio, highlights, and a career timeline. Like
//! contact info, the displayed record is the one flagged `primary`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validate::{check_year, require_text};
use crate::domain::Record;
use crate::error::FieldError;

// == Timeline Event ==
/// A single career/education milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub year: i32,
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

fn validate_timeline(timeline: &[TimelineEvent]) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for (i, event) in timeline.iter().enumerate() {
        errors.extend(require_text(&format!("timeline[{}].title", i), &event.title, 120));
        errors.extend(check_year(&format!("timeline[{}].year", i), event.year));
    }
    errors
}

// == About Content ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutContent {
    pub id: Uuid,
    pub headline: String,
    pub bio: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    /// The record the site displays. Exactly one record should carry this.
    pub primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// == Draft ==
/// Creation input for about content.
#[derive(Debug, Clone, Deserialize)]
pub struct AboutDraft {
    pub headline: String,
    pub bio: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default)]
    pub primary: bool,
}

// == Patch ==
/// Partial update for about content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AboutPatch {
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub timeline: Option<Vec<TimelineEvent>>,
    pub primary: Option<bool>,
}

impl Record for AboutContent {
    type Draft = AboutDraft;
    type Patch = AboutPatch;

    const KIND: &'static str = "about";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn validate_draft(draft: &AboutDraft) -> Vec<FieldError> {
        let mut errors = Vec::new();
        errors.extend(require_text("headline", &draft.headline, 160));
        errors.extend(require_text("bio", &draft.bio, 4000));
        errors.extend(validate_timeline(&draft.timeline));
        errors
    }

    fn validate_patch(patch: &AboutPatch) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(headline) = &patch.headline {
            errors.extend(require_text("headline", headline, 160));
        }
        if let Some(bio) = &patch.bio {
            errors.extend(require_text("bio", bio, 4000));
        }
        if let Some(timeline) = &patch.timeline {
            errors.extend(validate_timeline(timeline));
        }
        errors
    }

    fn from_draft(id: Uuid, now: DateTime<Utc>, draft: AboutDraft) -> Self {
        Self {
            id,
            headline: draft.headline,
            bio: draft.bio,
            highlights: draft.highlights,
            timeline: draft.timeline,
            primary: draft.primary,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: AboutPatch, now: DateTime<Utc>) {
        if let Some(headline) = patch.headline {
            self.headline = headline;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(highlights) = patch.highlights {
            self.highlights = highlights;
        }
        if let Some(timeline) = patch.timeline {
            self.timeline = timeline;
        }
        if let Some(primary) = patch.primary {
            self.primary = primary;
        }
        self.updated_at = now;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> AboutDraft {
        AboutDraft {
            headline: "Full-stack developer".to_string(),
            bio: "I build web things.".to_string(),
            highlights: vec!["10 shipped projects".to_string()],
            timeline: vec![
                TimelineEvent {
                    year: 2019,
                    title: "First dev role".to_string(),
                    detail: String::new(),
                },
                TimelineEvent {
                    year: 2023,
                    title: "Went independent".to_string(),
                    detail: "Freelance".to_string(),
                },
            ],
            primary: true,
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(AboutContent::validate_draft(&valid_draft()).is_empty());
    }

    #[test]
    fn test_timeline_event_fields_are_checked() {
        let mut draft = valid_draft();
        draft.timeline.push(TimelineEvent {
            year: 1200,
            title: String::new(),
            detail: String::new(),
        });

        let errors = AboutContent::validate_draft(&draft);
        assert!(errors.iter().any(|e| e.field == "timeline[2].title"));
        assert!(errors.iter().any(|e| e.field == "timeline[2].year"));
    }

    #[test]
    fn test_apply_patch_replaces_timeline() {
        let created = Utc::now();
        let mut about = AboutContent::from_draft(Uuid::new_v4(), created, valid_draft());

        about.apply_patch(
            AboutPatch {
                timeline: Some(vec![TimelineEvent {
                    year: 2025,
                    title: "New chapter".to_string(),
                    detail: String::new(),
                }]),
                ..Default::default()
            },
            created + chrono::Duration::seconds(2),
        );

        assert_eq!(about.timeline.len(), 1);
        assert_eq!(about.timeline[0].year, 2025);
        assert_eq!(about.headline, "Full-stack developer");
        assert!(about.updated_at > about.created_at);
    }
}
