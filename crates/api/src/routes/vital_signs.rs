//! Route definitions for vital sign readings.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::vital_signs;
use crate::state::AppState;

/// Routes mounted at `/vital-signs`. Readings are listed per patient under
/// `/patients/{id}/vital-signs`.
///
/// ```text
/// POST   /        -> record_vital_signs
/// DELETE /{id}    -> delete_vital_signs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(vital_signs::record_vital_signs))
        .route("/{id}", delete(vital_signs::delete_vital_signs))
}
