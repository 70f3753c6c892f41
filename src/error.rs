//! Error types for the content store
//!
//! Provides the unified error taxonomy using thiserror. Validation and
//! not-found outcomes are ordinary return values callers branch on;
//! collaborator failures are caught at the repository boundary and
//! represented here so no caller ever needs panic-style handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

// == Field Error ==
/// A single field-level validation failure. Every validation hook in the
/// crate returns this shape; an empty list means valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The offending field, as named in the request payload
    pub field: String,
    /// Human-readable description of the problem
    pub message: String,
}

impl FieldError {
    /// Creates a new FieldError
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// == Store Error Enum ==
/// Unified error type for the repository layer and HTTP surface.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Input failed validation; carries structured field errors
    #[error("Validation failed for {kind}")]
    Validation {
        /// Entity kind the input was for
        kind: &'static str,
        /// Field-level failures
        errors: Vec<FieldError>,
    },

    /// Requested identifier is absent from the collection
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind that was looked up
        kind: &'static str,
        /// The identifier that missed
        id: String,
    },

    /// The save collaborator failed; the in-memory mutation was applied
    #[error("Persistence failed during {operation} on {kind}: {message}")]
    Persistence {
        /// Entity kind being persisted
        kind: &'static str,
        /// Mutating operation that triggered the save
        operation: &'static str,
        /// Underlying failure
        message: String,
    },

    /// Caught collaborator panic-equivalent; never expected in normal flow
    #[error("Internal error: {0}")]
    Unknown(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            StoreError::Validation { errors, .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": self.to_string(),
                    "details": errors,
                }),
            ),
            StoreError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
            }
            StoreError::Persistence { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": self.to_string() }),
            ),
            StoreError::Unknown(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the content store.
pub type Result<T> = std::result::Result<T, StoreError>;
