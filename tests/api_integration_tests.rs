//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle for each endpoint against seeded
//! static collections.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tower::util::ServiceExt;
use uuid::Uuid;

use folio_store::api::create_router;
use folio_store::cache::CacheStore;
use folio_store::domain::{
    AboutContent, AboutDraft, ContactDraft, ContactInfo, Project, ProjectDraft, ProjectLinks,
    Record, Technology, TechnologyDraft, TimelineEvent,
};
use folio_store::loader::RetryPolicy;
use folio_store::repository::{
    CachePolicy, RepositoryRegistry, RepositorySources, SharedCache, StaticSource,
};
use folio_store::AppState;

// == Helper Functions ==

fn project(title: &str, category: &str, technologies: &[&str], year: i32, featured: bool) -> Project {
    Project::from_draft(
        Uuid::new_v4(),
        Utc::now(),
        ProjectDraft {
            title: title.to_string(),
            description: format!("{} description", title),
            category: category.to_string(),
            technologies: technologies.iter().map(|t| t.to_string()).collect(),
            links: ProjectLinks::default(),
            year,
            featured,
        },
    )
}

fn seeded_projects() -> Vec<Project> {
    vec![
        project("Hotel Booking Engine", "web", &["React", "Node"], 2021, true),
        project("Portfolio Site", "web", &["React", "TypeScript"], 2024, true),
        project("Hotel Review Scraper", "tooling", &["Python"], 2020, false),
        project("Inventory Service", "backend", &["Java"], 2022, false),
        project("City Hotel Map", "web", &["Vue"], 2019, false),
        project("Build Dashboard", "tooling", &["Rust"], 2023, true),
    ]
}

fn seeded_technologies() -> Vec<Technology> {
    vec![
        Technology::from_draft(
            Uuid::new_v4(),
            Utc::now(),
            TechnologyDraft {
                name: "Rust".to_string(),
                category: "language".to_string(),
                proficiency: 4,
                years_used: 3,
                featured: true,
            },
        ),
        Technology::from_draft(
            Uuid::new_v4(),
            Utc::now(),
            TechnologyDraft {
                name: "TypeScript".to_string(),
                category: "language".to_string(),
                proficiency: 5,
                years_used: 6,
                featured: true,
            },
        ),
    ]
}

fn seeded_contact() -> Vec<ContactInfo> {
    vec![
        ContactInfo::from_draft(
            Uuid::new_v4(),
            Utc::now(),
            ContactDraft {
                email: "archived@example.com".to_string(),
                location: None,
                socials: Vec::new(),
                available_for_work: false,
                primary: false,
            },
        ),
        ContactInfo::from_draft(
            Uuid::new_v4(),
            Utc::now(),
            ContactDraft {
                email: "hello@example.com".to_string(),
                location: Some("Lisbon".to_string()),
                socials: Vec::new(),
                available_for_work: true,
                primary: true,
            },
        ),
    ]
}

fn seeded_about() -> Vec<AboutContent> {
    vec![AboutContent::from_draft(
        Uuid::new_v4(),
        Utc::now(),
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
                    detail: String::new(),
                },
            ],
            primary: true,
        },
    )]
}

fn create_test_app() -> (Router, SharedCache) {
    let cache: SharedCache = Arc::new(RwLock::new(CacheStore::new(100, 300)));
    let registry = RepositoryRegistry::new(
        RepositorySources {
            projects: Arc::new(StaticSource::new(seeded_projects())),
            technologies: Arc::new(StaticSource::new(seeded_technologies())),
            contact: Arc::new(StaticSource::new(seeded_contact())),
            about: Arc::new(StaticSource::new(seeded_about())),
        },
        RetryPolicy::with_attempts(1),
        Some(CachePolicy {
            cache: cache.clone(),
            ttl_seconds: 300,
        }),
    );
    (create_router(AppState::new(registry, cache.clone())), cache)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Project Listing Tests ==

#[tokio::test]
async fn test_list_projects() {
    let (app, _) = create_test_app();

    let (status, json) = get_json(&app, "/projects").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"].as_u64().unwrap(), 6);
    assert_eq!(json["items"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_featured_projects_newest_first() {
    let (app, _) = create_test_app();

    let (status, json) = get_json(&app, "/projects/featured").await;

    assert_eq!(status, StatusCode::OK);
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["year"].as_i64().unwrap(), 2024);
    assert_eq!(items[2]["year"].as_i64().unwrap(), 2021);
}

#[tokio::test]
async fn test_search_projects_query_and_sort() {
    let (app, _) = create_test_app();

    let (status, json) =
        get_json(&app, "/projects/search?query=hotel&sort_by=title&sort_order=asc").await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["City Hotel Map", "Hotel Booking Engine", "Hotel Review Scraper"]
    );
}

#[tokio::test]
async fn test_search_projects_technology_filter_is_case_insensitive() {
    let (app, _) = create_test_app();

    let (status, json) = get_json(&app, "/projects/search?technology=react").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_project_statistics() {
    let (app, _) = create_test_app();

    let (status, json) = get_json(&app, "/projects/statistics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"].as_u64().unwrap(), 6);
    assert_eq!(json["featured"].as_u64().unwrap(), 3);
    assert_eq!(json["by_category"]["web"].as_u64().unwrap(), 3);
    assert_eq!(json["latest_year"].as_i64().unwrap(), 2024);
}

// == Project CRUD Tests ==

#[tokio::test]
async fn test_project_create_read_update_delete_cycle() {
    let (app, _) = create_test_app();

    // Create
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/projects")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{
                        "title": "Side Project",
                        "description": "A weekend experiment",
                        "category": "web",
                        "technologies": ["Svelte"],
                        "year": 2025
                    }"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_to_json(response.into_body()).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["title"].as_str().unwrap(), "Side Project");
    assert_eq!(created["created_at"], created["updated_at"]);

    // Read it back
    let (status, fetched) = get_json(&app, &format!("/projects/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"].as_str().unwrap(), "Side Project");

    // Update
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/projects/{}", id))
                .header("content-type", "application/json")
                .body(Body::from(r#"{"featured": true}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_to_json(response.into_body()).await;
    assert_eq!(updated["featured"].as_bool().unwrap(), true);
    assert_eq!(updated["title"].as_str().unwrap(), "Side Project");

    // Delete
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/projects/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Verify it's gone
    let (status, _) = get_json(&app, &format!("/projects/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_project_validation_error_carries_details() {
    let (app, _) = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/projects")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"title": "", "description": "x", "category": "web", "year": 123}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
    let details = json["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d["field"] == "title"));
    assert!(details.iter().any(|d| d["field"] == "year"));

    // Collection unchanged
    let (_, listing) = get_json(&app, "/projects").await;
    assert_eq!(listing["count"].as_u64().unwrap(), 6);
}

#[tokio::test]
async fn test_update_unknown_project_is_not_found() {
    let (app, _) = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/projects/{}", Uuid::new_v4()))
                .header("content-type", "application/json")
                .body(Body::from(r#"{"featured": true}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_delete_unknown_project_is_not_found() {
    let (app, _) = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/projects/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == Technology Endpoint Tests ==

#[tokio::test]
async fn test_list_technologies_with_name_search() {
    let (app, _) = create_test_app();

    let (status, json) = get_json(&app, "/technologies?q=script").await;

    assert_eq!(status, StatusCode::OK);
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"].as_str().unwrap(), "TypeScript");
}

#[tokio::test]
async fn test_technologies_by_category() {
    let (app, _) = create_test_app();

    let (status, json) = get_json(&app, "/technologies/category/language").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"].as_u64().unwrap(), 2);
}

#[tokio::test]
async fn test_technologies_proficiency_ordering() {
    let (app, _) = create_test_app();

    let (status, json) = get_json(&app, "/technologies?order=desc").await;

    assert_eq!(status, StatusCode::OK);
    let items = json["items"].as_array().unwrap();
    assert_eq!(items[0]["name"].as_str().unwrap(), "TypeScript");
    assert_eq!(items[1]["name"].as_str().unwrap(), "Rust");
}

// == About / Contact Endpoint Tests ==

#[tokio::test]
async fn test_get_about_returns_primary_record() {
    let (app, _) = create_test_app();

    let (status, json) = get_json(&app, "/about").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["headline"].as_str().unwrap(), "Full-stack developer");
}

#[tokio::test]
async fn test_about_timeline_most_recent_first() {
    let (app, _) = create_test_app();

    let (status, json) = get_json(&app, "/about/timeline").await;

    assert_eq!(status, StatusCode::OK);
    let items = json["items"].as_array().unwrap();
    assert_eq!(items[0]["year"].as_i64().unwrap(), 2023);
    assert_eq!(items[1]["year"].as_i64().unwrap(), 2019);
}

#[tokio::test]
async fn test_get_contact_is_flag_based() {
    let (app, _) = create_test_app();

    let (status, json) = get_json(&app, "/contact").await;

    assert_eq!(status, StatusCode::OK);
    // The primary record, not the first seeded one
    assert_eq!(json["email"].as_str().unwrap(), "hello@example.com");
}

#[tokio::test]
async fn test_update_contact_patches_primary() {
    let (app, _) = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/contact")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"available_for_work": false}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["available_for_work"].as_bool().unwrap(), false);
    assert_eq!(json["email"].as_str().unwrap(), "hello@example.com");
}

// == Cache / Health Tests ==

#[tokio::test]
async fn test_repeated_listing_hits_the_cache() {
    let (app, cache) = create_test_app();

    // First read primes the cache, second one hits it
    let (status, _) = get_json(&app, "/projects").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get_json(&app, "/projects").await;
    assert_eq!(status, StatusCode::OK);

    let stats = cache.read().await.stats();
    assert!(stats.size >= 1);
    assert!(stats.total_hits >= 1, "second listing should hit the cache");
}

#[tokio::test]
async fn test_cache_stats_endpoint_shape() {
    let (app, _) = create_test_app();

    let (status, json) = get_json(&app, "/cache/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["max_size"].as_u64().unwrap(), 100);
    assert!(json.get("size").is_some());
    assert!(json.get("total_hits").is_some());
    assert!(json.get("expired_count").is_some());
    assert!(json.get("average_age_ms").is_some());
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app();

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_invalid_json_request_is_client_error() {
    let (app, _) = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/projects")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"invalid json"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Axum rejects malformed JSON bodies before the handler runs
    assert!(response.status().is_client_error());
}
