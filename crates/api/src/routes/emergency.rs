//! Route definitions for emergency cases.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::emergency;
use crate::state::AppState;

/// Routes mounted at `/emergency-cases`.
///
/// ```text
/// GET    /                    -> list_cases
/// POST   /                    -> create_case
/// GET    /{id}                -> get_case
/// PUT    /{id}                -> update_case
/// POST   /{id}/transition     -> transition_case
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(emergency::list_cases).post(emergency::create_case))
        .route("/{id}", get(emergency::get_case).put(emergency::update_case))
        .route("/{id}/transition", post(emergency::transition_case))
}
