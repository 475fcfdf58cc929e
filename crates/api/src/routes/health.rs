//! Liveness endpoint for load balancers and the ops dashboard.
//!
//! Always answers 200; a lost database shows up as `"degraded"` in the body
//! so that the process itself is not restarted for an outage it cannot fix.

use std::time::Duration;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Upper bound on the database round trip. The pool's own acquire timeout
/// (30s) outlasts the request timeout, so an unreachable server would
/// otherwise surface as a 408 instead of a degraded report.
const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = matches!(
        tokio::time::timeout(DB_CHECK_TIMEOUT, regsuite_db::health_check(&state.pool)).await,
        Ok(Ok(()))
    );
    if !db_healthy {
        tracing::warn!(timeout_ms = DB_CHECK_TIMEOUT.as_millis() as u64, "Database unreachable");
    }

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// `GET /health`, mounted beside `/api/v1` rather than under it.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
