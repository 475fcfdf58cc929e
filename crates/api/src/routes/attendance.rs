//! Route definitions for attendance.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// GET    /                -> list_attendance
/// POST   /                -> record_attendance
/// POST   /mark-present    -> bulk_mark_present
/// GET    /summary         -> attendance_summary
/// PUT    /{id}            -> update_attendance
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(attendance::list_attendance).post(attendance::record_attendance),
        )
        .route("/mark-present", post(attendance::bulk_mark_present))
        .route("/summary", get(attendance::attendance_summary))
        .route("/{id}", put(attendance::update_attendance))
}
