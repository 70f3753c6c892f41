//! API Routes
//!
//! Configures the Axum router with all content endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    about_timeline, cache_stats, create_project, create_technology, delete_project,
    delete_technology, featured_projects, featured_technologies, get_about, get_contact,
    get_project, get_technology, health_handler, list_projects, list_technologies,
    project_statistics, search_projects, technologies_by_category, update_about, update_contact,
    update_project, update_technology, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET|POST /projects`, `GET /projects/featured`, `GET /projects/search`,
///   `GET /projects/statistics`, `GET|PUT|DELETE /projects/:id`
/// - `GET|POST /technologies`, `GET /technologies/featured`,
///   `GET /technologies/category/:category`, `GET|PUT|DELETE /technologies/:id`
/// - `GET|PUT /about`, `GET /about/timeline`
/// - `GET|PUT /contact`
/// - `GET /cache/stats` - Read-through cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/featured", get(featured_projects))
        .route("/projects/search", get(search_projects))
        .route("/projects/statistics", get(project_statistics))
        .route(
            "/projects/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route(
            "/technologies",
            get(list_technologies).post(create_technology),
        )
        .route("/technologies/featured", get(featured_technologies))
        .route(
            "/technologies/category/:category",
            get(technologies_by_category),
        )
        .route(
            "/technologies/:id",
            get(get_technology)
                .put(update_technology)
                .delete(delete_technology),
        )
        .route("/about", get(get_about).put(update_about))
        .route("/about/timeline", get(about_timeline))
        .route("/contact", put(update_contact).get(get_contact))
        .route("/cache/stats", get(cache_stats))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
