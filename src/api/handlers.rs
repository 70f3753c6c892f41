//! API Handlers
//!
//! HTTP request handlers for the content endpoints. Every handler returns
//! either a JSON body or a `StoreError`, which maps itself to a status code
//! — no handler deals in exceptions.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::cache::{CacheStats, CacheStore, JsonSnapshot};
use crate::config::Config;
use crate::domain::{
    AboutContent, AboutPatch, ContactInfo, ContactPatch, Project, ProjectDraft, ProjectPatch,
    Record, Technology, TechnologyDraft, TechnologyPatch, TimelineEvent,
};
use crate::error::{Result, StoreError};
use crate::loader::RetryPolicy;
use crate::models::{DeleteResponse, HealthResponse, ListResponse, TechnologyListParams};
use crate::repository::{
    CachePolicy, ProjectQuery, ProjectStatistics, RepositoryRegistry, RepositorySources,
    SharedCache,
};

// == App State ==
/// Application state shared across all handlers: the repository registry
/// and the shared read-through cache, both injected at composition time.
#[derive(Clone)]
pub struct AppState {
    /// All content repositories
    pub registry: Arc<RepositoryRegistry>,
    /// The cache behind the repositories, exposed for stats and cleanup
    pub cache: SharedCache,
}

impl AppState {
    /// Creates state from an already wired registry and cache.
    pub fn new(registry: RepositoryRegistry, cache: SharedCache) -> Self {
        Self {
            registry: Arc::new(registry),
            cache,
        }
    }

    /// Production wiring from configuration: JSON file sources under the
    /// data directory, a shared cache (snapshot-backed when configured),
    /// and the read-through policy on every repository.
    pub fn from_config(config: &Config) -> Self {
        let store = match &config.cache_snapshot_path {
            Some(path) => CacheStore::with_snapshot(
                config.cache_max_entries,
                config.cache_default_ttl,
                Box::new(JsonSnapshot::new(path)),
            ),
            None => CacheStore::new(config.cache_max_entries, config.cache_default_ttl),
        };
        let cache: SharedCache = Arc::new(RwLock::new(store));

        let registry = RepositoryRegistry::new(
            RepositorySources::json_files(&config.data_dir),
            RetryPolicy::with_attempts(config.load_max_attempts),
            Some(CachePolicy {
                cache: cache.clone(),
                ttl_seconds: config.cache_default_ttl,
            }),
        );

        Self::new(registry, cache)
    }
}

// == Project Handlers ==

/// Handler for GET /projects
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<ListResponse<Project>>> {
    let projects = state.registry.projects.get_all().await?;
    Ok(Json(ListResponse::new(projects)))
}

/// Handler for GET /projects/featured
pub async fn featured_projects(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Project>>> {
    let projects = state.registry.projects.get_featured().await?;
    Ok(Json(ListResponse::new(projects)))
}

/// Handler for GET /projects/search
pub async fn search_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<ListResponse<Project>>> {
    let projects = state.registry.projects.search(&query).await?;
    Ok(Json(ListResponse::new(projects)))
}

/// Handler for GET /projects/statistics
pub async fn project_statistics(
    State(state): State<AppState>,
) -> Result<Json<ProjectStatistics>> {
    let stats = state.registry.projects.statistics().await?;
    Ok(Json(stats))
}

/// Handler for GET /projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>> {
    state
        .registry
        .projects
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or(StoreError::NotFound {
            kind: Project::KIND,
            id: id.to_string(),
        })
}

/// Handler for POST /projects
pub async fn create_project(
    State(state): State<AppState>,
    Json(draft): Json<ProjectDraft>,
) -> Result<Json<Project>> {
    let project = state.registry.projects.create(draft).await?;
    Ok(Json(project))
}

/// Handler for PUT /projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProjectPatch>,
) -> Result<Json<Project>> {
    let project = state.registry.projects.update(id, patch).await?;
    Ok(Json(project))
}

/// Handler for DELETE /projects/:id
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    state.registry.projects.delete(id).await?;
    Ok(Json(DeleteResponse::new(Project::KIND, id)))
}

// == Technology Handlers ==

/// Handler for GET /technologies
///
/// `?q=` searches names; `?order=asc|desc` sorts by proficiency instead.
pub async fn list_technologies(
    State(state): State<AppState>,
    Query(params): Query<TechnologyListParams>,
) -> Result<Json<ListResponse<Technology>>> {
    let repo = &state.registry.technologies;
    let technologies = if let Some(q) = &params.q {
        repo.search(q).await?
    } else if params.order.is_some() {
        repo.by_proficiency(params.order).await?
    } else {
        repo.get_all().await?
    };
    Ok(Json(ListResponse::new(technologies)))
}

/// Handler for GET /technologies/featured
pub async fn featured_technologies(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Technology>>> {
    let technologies = state.registry.technologies.get_featured().await?;
    Ok(Json(ListResponse::new(technologies)))
}

/// Handler for GET /technologies/category/:category
pub async fn technologies_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<ListResponse<Technology>>> {
    let technologies = state
        .registry
        .technologies
        .get_by_category(&category)
        .await?;
    Ok(Json(ListResponse::new(technologies)))
}

/// Handler for GET /technologies/:id
pub async fn get_technology(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Technology>> {
    state
        .registry
        .technologies
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or(StoreError::NotFound {
            kind: Technology::KIND,
            id: id.to_string(),
        })
}

/// Handler for POST /technologies
pub async fn create_technology(
    State(state): State<AppState>,
    Json(draft): Json<TechnologyDraft>,
) -> Result<Json<Technology>> {
    let technology = state.registry.technologies.create(draft).await?;
    Ok(Json(technology))
}

/// Handler for PUT /technologies/:id
pub async fn update_technology(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<TechnologyPatch>,
) -> Result<Json<Technology>> {
    let technology = state.registry.technologies.update(id, patch).await?;
    Ok(Json(technology))
}

/// Handler for DELETE /technologies/:id
pub async fn delete_technology(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    state.registry.technologies.delete(id).await?;
    Ok(Json(DeleteResponse::new(Technology::KIND, id)))
}

// == About Handlers ==

/// Handler for GET /about
pub async fn get_about(State(state): State<AppState>) -> Result<Json<AboutContent>> {
    let about = state.registry.about.primary().await?;
    Ok(Json(about))
}

/// Handler for PUT /about
pub async fn update_about(
    State(state): State<AppState>,
    Json(patch): Json<AboutPatch>,
) -> Result<Json<AboutContent>> {
    let about = state.registry.about.update_primary(patch).await?;
    Ok(Json(about))
}

/// Handler for GET /about/timeline
pub async fn about_timeline(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<TimelineEvent>>> {
    let events = state.registry.about.timeline().await?;
    Ok(Json(ListResponse::new(events)))
}

// == Contact Handlers ==

/// Handler for GET /contact
pub async fn get_contact(State(state): State<AppState>) -> Result<Json<ContactInfo>> {
    let contact = state.registry.contact.primary().await?;
    Ok(Json(contact))
}

/// Handler for PUT /contact
pub async fn update_contact(
    State(state): State<AppState>,
    Json(patch): Json<ContactPatch>,
) -> Result<Json<ContactInfo>> {
    let contact = state.registry.contact.update_primary(patch).await?;
    Ok(Json(contact))
}

// == Operational Handlers ==

/// Handler for GET /cache/stats
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    let cache = state.cache.read().await;
    Json(cache.stats())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
