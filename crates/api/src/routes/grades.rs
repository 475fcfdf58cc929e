//! Route definitions for grades.

use axum::routing::get;
use axum::Router;

use crate::handlers::grades;
use crate::state::AppState;

/// Routes mounted at `/grades`.
///
/// ```text
/// GET    /        -> list_grades
/// POST   /        -> create_grade
/// GET    /{id}    -> get_grade
/// PUT    /{id}    -> update_grade
/// DELETE /{id}    -> delete_grade
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(grades::list_grades).post(grades::create_grade))
        .route(
            "/{id}",
            get(grades::get_grade)
                .put(grades::update_grade)
                .delete(grades::delete_grade),
        )
}
