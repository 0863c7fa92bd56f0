//! Request types for the shared crate
//!
//! Common request types used across the platform

use serde::{Deserialize, Serialize};

/// Pagination query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationQuery {
    /// Page number (1-based, default: 1)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Items per page (default: 20, max: 100)
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PaginationQuery {
    /// Get the offset into the full result set
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) as u64 * self.per_page as u64
    }

    /// Get the limit (clamped to max 100)
    pub fn limit(&self) -> u32 {
        std::cmp::min(self.per_page, 100)
    }
}

/// Structure list query: pagination plus search and type filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,

    /// Search keyword matched against name and city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Restrict to structures carrying this type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<i64>,

    /// Restrict to structures in this city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl StructureQuery {
    /// Query for one page with no filters
    pub fn page(page: u32) -> Self {
        Self {
            pagination: PaginationQuery {
                page,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Query filtered by search keyword
    pub fn search(keyword: impl Into<String>) -> Self {
        Self {
            search: Some(keyword.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let q: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 20);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_pagination_offset_and_limit() {
        let q = PaginationQuery {
            page: 3,
            per_page: 25,
        };
        assert_eq!(q.offset(), 50);
        assert_eq!(q.limit(), 25);

        let q = PaginationQuery {
            page: 1,
            per_page: 500,
        };
        assert_eq!(q.limit(), 100);
    }

    #[test]
    fn test_structure_query_builders() {
        let q = StructureQuery::page(2);
        assert_eq!(q.pagination.page, 2);
        assert!(q.search.is_none());

        let q = StructureQuery::search("olympia");
        assert_eq!(q.search.as_deref(), Some("olympia"));
        assert_eq!(q.pagination.page, 1);
    }
}
