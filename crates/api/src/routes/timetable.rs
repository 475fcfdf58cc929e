//! Route definitions for the timetable.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::timetable;
use crate::state::AppState;

/// Routes mounted at `/timetable`.
///
/// ```text
/// GET    /        -> list_slots (?class_id=&teacher_id=&day_of_week=)
/// POST   /        -> create_slot
/// DELETE /{id}    -> delete_slot
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(timetable::list_slots).post(timetable::create_slot))
        .route("/{id}", delete(timetable::delete_slot))
}
