//! Route definitions for operator profiles.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::operators;
use crate::state::AppState;

/// Routes mounted at `/operators`.
///
/// ```text
/// GET    /                -> list_operators
/// POST   /                -> create_operator
/// GET    /{id}            -> get_operator
/// PUT    /{id}            -> update_operator
/// DELETE /{id}            -> delete_operator (licenses cascade)
/// POST   /{id}/status     -> change_operator_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(operators::list_operators).post(operators::create_operator))
        .route(
            "/{id}",
            get(operators::get_operator)
                .put(operators::update_operator)
                .delete(operators::delete_operator),
        )
        .route("/{id}/status", post(operators::change_operator_status))
}
