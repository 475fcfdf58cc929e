//! Route definitions for doctors.

use axum::routing::get;
use axum::Router;

use crate::handlers::doctors;
use crate::state::AppState;

/// Routes mounted at `/doctors`. Writes require the `admin` role.
///
/// ```text
/// GET    /        -> list_doctors (?active_only=)
/// POST   /        -> create_doctor
/// GET    /{id}    -> get_doctor
/// PUT    /{id}    -> update_doctor
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(doctors::list_doctors).post(doctors::create_doctor))
        .route("/{id}", get(doctors::get_doctor).put(doctors::update_doctor))
}
