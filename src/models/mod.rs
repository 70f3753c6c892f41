//! API Models
//!
//! Query-parameter DTOs and response envelopes for the HTTP surface.
//! Request bodies deserialize straight into the domain draft/patch types.

pub mod requests;
pub mod responses;

pub use requests::TechnologyListParams;
pub use responses::{DeleteResponse, HealthResponse, ListResponse};
