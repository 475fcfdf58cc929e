//! Route definitions for classes and subjects.
//!
//! Two routers are provided:
//! - `router()` for classes and their sections mounted at `/classes`
//! - `subjects_router()` for the subject catalogue mounted at `/subjects`

use axum::routing::get;
use axum::Router;

use crate::handlers::classes;
use crate::state::AppState;

/// Routes mounted at `/classes`.
///
/// ```text
/// GET    /                -> list_classes
/// POST   /                -> create_class
/// GET    /{id}            -> get_class
/// PUT    /{id}            -> update_class
/// DELETE /{id}            -> delete_class
/// GET    /{id}/sections   -> list_sections
/// POST   /{id}/sections   -> create_section
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(classes::list_classes).post(classes::create_class))
        .route(
            "/{id}",
            get(classes::get_class)
                .put(classes::update_class)
                .delete(classes::delete_class),
        )
        .route(
            "/{id}/sections",
            get(classes::list_sections).post(classes::create_section),
        )
}

/// Routes mounted at `/subjects`.
///
/// ```text
/// GET    /        -> list_subjects
/// POST   /        -> create_subject
/// ```
pub fn subjects_router() -> Router<AppState> {
    Router::new().route("/", get(classes::list_subjects).post(classes::create_subject))
}
