//! API Module
//!
//! HTTP handlers and routing for the content REST API: project,
//! technology, about, and contact endpoints plus cache stats and health.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
