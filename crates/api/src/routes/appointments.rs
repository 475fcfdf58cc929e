//! Route definitions for appointments.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::appointments;
use crate::state::AppState;

/// Routes mounted at `/appointments`.
///
/// ```text
/// GET    /                -> list_appointments
/// POST   /                -> create_appointment
/// POST   /confirm         -> confirm_appointments (bulk)
/// GET    /{id}            -> get_appointment
/// PUT    /{id}            -> update_appointment
/// POST   /{id}/start      -> start_consultation
/// POST   /{id}/complete   -> complete_appointment (creates a medical record)
/// POST   /{id}/cancel     -> cancel_appointment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route("/confirm", post(appointments::confirm_appointments))
        .route(
            "/{id}",
            get(appointments::get_appointment).put(appointments::update_appointment),
        )
        .route("/{id}/start", post(appointments::start_consultation))
        .route("/{id}/complete", post(appointments::complete_appointment))
        .route("/{id}/cancel", post(appointments::cancel_appointment))
}
