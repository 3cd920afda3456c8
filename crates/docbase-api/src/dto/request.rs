//! Query parameters accepted by the document routes.

use serde::{Deserialize, Serialize};

use docbase_core::error::AppError;
use docbase_core::types::SortSpec;

/// Sort field used when the client names none.
pub const DEFAULT_SORT_FIELD: &str = "createdAt";
/// Sort order used when the client names none.
pub const DEFAULT_SORT_ORDER: &str = "desc";

/// `GET /api/{kind}` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Dotted field path to order by.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub order: Option<String>,
    /// Requested page size, capped by the configured maximum.
    pub page_size: Option<u32>,
}

impl PageQuery {
    /// Resolve the sort with defaults applied.
    pub fn sort_spec(&self) -> Result<SortSpec, AppError> {
        SortSpec::parse(
            self.sort.as_deref().unwrap_or(DEFAULT_SORT_FIELD),
            self.order.as_deref().unwrap_or(DEFAULT_SORT_ORDER),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbase_core::types::SortDirection;

    #[test]
    fn test_defaults_to_newest_first() {
        let spec = PageQuery::default().sort_spec().unwrap();
        assert_eq!(spec.path.to_string(), "createdAt");
        assert_eq!(spec.direction, SortDirection::Desc);
    }

    #[test]
    fn test_rejects_bad_field() {
        let query = PageQuery {
            sort: Some("name; DROP".to_string()),
            ..Default::default()
        };
        assert!(query.sort_spec().is_err());
    }
}
