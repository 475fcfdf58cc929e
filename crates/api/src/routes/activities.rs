//! Route definitions for activities.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::activities;
use crate::state::AppState;

/// Routes mounted at `/activities`.
///
/// ```text
/// GET    /            -> list_activities (?entity_type=&entity_id=&open_only=)
/// POST   /{id}/done   -> mark_activity_done
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(activities::list_activities))
        .route("/{id}/done", post(activities::mark_activity_done))
}
