//! Shared query-parameter types for list endpoints.

use regsuite_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use serde::Deserialize;

/// `?limit=&offset=` for endpoints without their own filter struct.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamped `(limit, offset)` pair ready for a repository call.
    pub fn resolve(&self) -> (i64, i64) {
        page(self.limit, self.offset)
    }
}

/// Clamp raw `limit` / `offset` values taken from any filter struct.
pub fn page(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    (clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT), clamp_offset(offset))
}

/// `?active_only=` toggle for small reference lists.
#[derive(Debug, Default, Deserialize)]
pub struct ActiveFilter {
    #[serde(default)]
    pub active_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_clamps_limit_and_offset() {
        assert_eq!(page(None, None), (DEFAULT_LIMIT, 0));
        assert_eq!(page(Some(10_000), Some(-4)), (MAX_LIMIT, 0));
        assert_eq!(PaginationParams { limit: Some(5), offset: Some(10) }.resolve(), (5, 10));
    }
}
