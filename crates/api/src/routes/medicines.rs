//! Route definitions for the pharmacy catalogue.
//!
//! Two routers are provided:
//! - `router()` for medicines mounted at `/medicines`
//! - `dose_units_router()` for dose units mounted at `/dose-units`

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::medicines;
use crate::state::AppState;

/// Routes mounted at `/medicines`.
///
/// ```text
/// GET    /        -> list_medicines
/// POST   /        -> create_medicine
/// GET    /{id}    -> get_medicine
/// PUT    /{id}    -> update_medicine
/// DELETE /{id}    -> delete_medicine
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(medicines::list_medicines).post(medicines::create_medicine))
        .route(
            "/{id}",
            get(medicines::get_medicine)
                .put(medicines::update_medicine)
                .delete(medicines::delete_medicine),
        )
}

/// Routes mounted at `/dose-units`.
///
/// ```text
/// GET    /        -> list_dose_units
/// POST   /        -> create_dose_unit
/// DELETE /{id}    -> delete_dose_unit
/// ```
pub fn dose_units_router() -> Router<AppState> {
    Router::new()
        .route("/", get(medicines::list_dose_units).post(medicines::create_dose_unit))
        .route("/{id}", delete(medicines::delete_dose_unit))
}
