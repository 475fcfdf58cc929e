//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "data": T }` envelope used by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Result of a bulk action: how many records the action touched.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}
