//! Route definitions for operator licenses.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::licenses;
use crate::state::AppState;

/// Routes mounted at `/licenses`.
///
/// ```text
/// GET    /                -> list_licenses
/// POST   /                -> create_license
/// GET    /expiring        -> expiring_licenses (?days=)
/// GET    /{id}            -> get_license
/// PUT    /{id}            -> update_license
/// DELETE /{id}            -> delete_license
/// POST   /{id}/status     -> change_license_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(licenses::list_licenses).post(licenses::create_license))
        .route("/expiring", get(licenses::expiring_licenses))
        .route(
            "/{id}",
            get(licenses::get_license)
                .put(licenses::update_license)
                .delete(licenses::delete_license),
        )
        .route("/{id}/status", post(licenses::change_license_status))
}
