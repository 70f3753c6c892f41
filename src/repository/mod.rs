//! Repository Module
//!
//! A uniform async interface over the content collections: a generic CRUD
//! repository with lazy loading and read-through caching, data-source
//! collaborators, the concrete per-entity repositories, and the registry
//! that composes them.

mod about;
mod base;
mod contact;
mod project;
mod registry;
mod source;
mod technology;

// Re-export public types
pub use about::AboutRepository;
pub use base::{CachePolicy, Repository, SharedCache};
pub use contact::ContactRepository;
pub use project::{
    ProjectQuery, ProjectRepository, ProjectSortField, ProjectStatistics, SortOrder,
};
pub use registry::{RepositoryRegistry, RepositorySources};
pub use source::{DataSource, JsonFileSource, StaticSource};
pub use technology::TechnologyRepository;
