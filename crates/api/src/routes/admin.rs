//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{jobs, sequences};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /sequences           -> list_sequences
/// PUT    /sequences/{code}    -> update_sequence
/// GET    /jobs                -> list_jobs
/// POST   /jobs/{name}/run     -> run_job
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sequences", get(sequences::list_sequences))
        .route("/sequences/{code}", put(sequences::update_sequence))
        .route("/jobs", get(jobs::list_jobs))
        .route("/jobs/{name}/run", post(jobs::run_job))
}
