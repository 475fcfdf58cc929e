//! Route definitions for ICU beds.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::icu_beds;
use crate::state::AppState;

/// Routes mounted at `/icu-beds`.
///
/// ```text
/// GET    /                -> list_beds (?status=)
/// POST   /                -> create_bed
/// GET    /{id}            -> get_bed
/// PUT    /{id}            -> update_bed
/// DELETE /{id}            -> delete_bed (not while booked)
/// POST   /{id}/assign     -> assign_bed
/// POST   /{id}/release    -> release_bed
/// POST   /{id}/status     -> change_bed_status (maintenance <-> available)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(icu_beds::list_beds).post(icu_beds::create_bed))
        .route(
            "/{id}",
            get(icu_beds::get_bed)
                .put(icu_beds::update_bed)
                .delete(icu_beds::delete_bed),
        )
        .route("/{id}/assign", post(icu_beds::assign_bed))
        .route("/{id}/release", post(icu_beds::release_bed))
        .route("/{id}/status", post(icu_beds::change_bed_status))
}
