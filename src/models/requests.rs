//! Request DTOs for the content API
//!
//! Bodies for create/update deserialize directly into the domain
//! draft/patch types; what lives here are the query-parameter shapes.

use serde::Deserialize;

use crate::repository::SortOrder;

/// Query parameters for GET /technologies.
///
/// `q` searches names (case-insensitive substring); `order` sorts the full
/// collection by proficiency instead. When both are present, `q` wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TechnologyListParams {
    /// Name substring filter
    pub q: Option<String>,
    /// Proficiency ordering for the unfiltered listing
    pub order: Option<SortOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_deserialize_from_query_shape() {
        let params: TechnologyListParams =
            serde_json::from_str(r#"{"q":"rust","order":"desc"}"#).unwrap();
        assert_eq!(params.q.as_deref(), Some("rust"));
        assert_eq!(params.order, Some(SortOrder::Desc));
    }

    #[test]
    fn test_params_default_is_empty() {
        let params = TechnologyListParams::default();
        assert!(params.q.is_none());
        assert!(params.order.is_none());
    }
}
