//! Repository Registry
//!
//! Explicit composition-time container for the four content repositories.
//! Built once where the application is wired together and handed to
//! whatever needs it (the HTTP state, tests) — there is no global accessor
//! and no string-keyed lookup.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{AboutContent, ContactInfo, Project, Record, Technology};
use crate::loader::RetryPolicy;
use crate::repository::{
    AboutRepository, CachePolicy, ContactRepository, DataSource, JsonFileSource,
    ProjectRepository, Repository, TechnologyRepository,
};

// == Repository Sources ==
/// The four collaborator data sources, one per collection.
pub struct RepositorySources {
    pub projects: Arc<dyn DataSource<Project>>,
    pub technologies: Arc<dyn DataSource<Technology>>,
    pub contact: Arc<dyn DataSource<ContactInfo>>,
    pub about: Arc<dyn DataSource<AboutContent>>,
}

impl RepositorySources {
    /// Production wiring: one JSON file per collection under `data_dir`.
    pub fn json_files(data_dir: &Path) -> Self {
        Self {
            projects: Arc::new(JsonFileSource::new(data_dir.join("projects.json"))),
            technologies: Arc::new(JsonFileSource::new(data_dir.join("technologies.json"))),
            contact: Arc::new(JsonFileSource::new(data_dir.join("contact.json"))),
            about: Arc::new(JsonFileSource::new(data_dir.join("about.json"))),
        }
    }
}

// == Repository Registry ==
/// All content repositories, ready to serve.
pub struct RepositoryRegistry {
    pub projects: ProjectRepository,
    pub technologies: TechnologyRepository,
    pub contact: ContactRepository,
    pub about: AboutRepository,
}

impl RepositoryRegistry {
    /// Wires every repository with the same retry pacing and (optional)
    /// shared read-through cache.
    pub fn new(sources: RepositorySources, retry: RetryPolicy, cache: Option<CachePolicy>) -> Self {
        fn build<T: Record>(
            source: Arc<dyn DataSource<T>>,
            retry: RetryPolicy,
            cache: Option<CachePolicy>,
        ) -> Repository<T> {
            let repository = Repository::new(source).with_retry(retry);
            match cache {
                Some(policy) => repository.with_cache(policy),
                None => repository,
            }
        }

        Self {
            projects: ProjectRepository::new(build(sources.projects, retry.clone(), cache.clone())),
            technologies: TechnologyRepository::new(build(
                sources.technologies,
                retry.clone(),
                cache.clone(),
            )),
            contact: ContactRepository::new(build(sources.contact, retry.clone(), cache.clone())),
            about: AboutRepository::new(build(sources.about, retry, cache)),
        }
    }
}
