//! Route definitions for students.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /                -> list_students
/// POST   /                -> register_student
/// GET    /{id}            -> get_student
/// PUT    /{id}            -> update_student
/// DELETE /{id}            -> delete_student
/// POST   /{id}/status     -> change_student_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(students::list_students).post(students::register_student))
        .route(
            "/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .route("/{id}/status", post(students::change_student_status))
}
