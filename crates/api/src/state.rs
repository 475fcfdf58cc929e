use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference counted and everything else sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: regsuite_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Event bus feeding the activity recorder.
    pub event_bus: Arc<regsuite_events::EventBus>,
}
