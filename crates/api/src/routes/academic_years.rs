//! Route definitions for academic years.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::academic_years;
use crate::state::AppState;

/// Routes mounted at `/academic-years`.
///
/// ```text
/// GET    /                    -> list_years
/// POST   /                    -> create_year
/// GET    /current             -> current_year
/// GET    /{id}                -> get_year
/// PUT    /{id}                -> update_year
/// POST   /{id}/set-current    -> set_current_year
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(academic_years::list_years).post(academic_years::create_year))
        .route("/current", get(academic_years::current_year))
        .route(
            "/{id}",
            get(academic_years::get_year).put(academic_years::update_year),
        )
        .route("/{id}/set-current", post(academic_years::set_current_year))
}
