//! Response DTOs for the content API
//!
//! Defines the structure of outgoing HTTP response bodies. Entities
//! themselves serialize directly; these are the envelopes around them.

use serde::Serialize;

/// List envelope carrying the item count alongside the items.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T> ListResponse<T> {
    /// Wraps a collection, recording its length.
    pub fn new(items: Vec<T>) -> Self {
        let count = items.len();
        Self { items, count }
    }
}

/// Response body for successful deletes.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The deleted record's identifier
    pub id: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(kind: &str, id: impl ToString) -> Self {
        let id = id.to_string();
        Self {
            message: format!("{} '{}' deleted successfully", kind, id),
            id,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
