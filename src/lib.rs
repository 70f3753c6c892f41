//! Folio Store - content store and API for a personal portfolio site
//!
//! In-memory content collections behind a uniform repository interface,
//! fronted by a TTL/LRU read-through cache and served over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod loader;
pub mod models;
pub mod repository;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
