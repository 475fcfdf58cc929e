//! Route definitions for prescriptions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::prescriptions;
use crate::state::AppState;

/// Routes mounted at `/prescriptions`.
///
/// ```text
/// GET    /                -> list_prescriptions
/// POST   /                -> create_prescription (with lines)
/// GET    /{id}            -> get_prescription
/// DELETE /{id}            -> delete_prescription (draft or cancelled)
/// POST   /{id}/confirm    -> confirm_prescription (stock check)
/// POST   /{id}/dispense   -> dispense_prescription (stock decrement)
/// POST   /{id}/cancel     -> cancel_prescription
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(prescriptions::list_prescriptions).post(prescriptions::create_prescription),
        )
        .route(
            "/{id}",
            get(prescriptions::get_prescription).delete(prescriptions::delete_prescription),
        )
        .route("/{id}/confirm", post(prescriptions::confirm_prescription))
        .route("/{id}/dispense", post(prescriptions::dispense_prescription))
        .route("/{id}/cancel", post(prescriptions::cancel_prescription))
}
