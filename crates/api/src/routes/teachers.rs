//! Route definitions for teachers.

use axum::routing::get;
use axum::Router;

use crate::handlers::teachers;
use crate::state::AppState;

/// Routes mounted at `/teachers`.
///
/// ```text
/// GET    /        -> list_teachers
/// POST   /        -> create_teacher
/// GET    /{id}    -> get_teacher
/// PUT    /{id}    -> update_teacher
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(teachers::list_teachers).post(teachers::create_teacher))
        .route("/{id}", get(teachers::get_teacher).put(teachers::update_teacher))
}
