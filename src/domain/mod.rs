//! Domain Model
//!
//! The content entities served by the store, the `Record` trait the generic
//! repository is written against, and shared validation helpers.

mod about;
mod contact;
mod project;
mod record;
mod technology;

pub(crate) mod validate;

pub use about::{AboutContent, AboutDraft, AboutPatch, TimelineEvent};
pub use contact::{ContactDraft, ContactInfo, ContactPatch, SocialLink};
pub use project::{Project, ProjectDraft, ProjectLinks, ProjectPatch};
pub use record::Record;
pub use technology::{Technology, TechnologyDraft, TechnologyPatch};
