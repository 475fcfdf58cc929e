//! Route definitions for sites and towers.

use axum::routing::get;
use axum::Router;

use crate::handlers::sites;
use crate::state::AppState;

/// Routes mounted at `/sites`.
///
/// ```text
/// GET    /        -> list_sites
/// POST   /        -> create_site
/// GET    /{id}    -> get_site
/// PUT    /{id}    -> update_site
/// DELETE /{id}    -> delete_site
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sites::list_sites).post(sites::create_site))
        .route(
            "/{id}",
            get(sites::get_site).put(sites::update_site).delete(sites::delete_site),
        )
}
