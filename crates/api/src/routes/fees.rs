//! Route definitions for fees.
//!
//! Two routers are provided:
//! - `router()` for fees mounted at `/fees`
//! - `fee_types_router()` for fee types mounted at `/fee-types`

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::fees;
use crate::state::AppState;

/// Routes mounted at `/fees`.
///
/// ```text
/// GET    /                -> list_fees
/// POST   /                -> create_fee
/// GET    /{id}            -> get_fee
/// DELETE /{id}            -> delete_fee (draft only)
/// POST   /{id}/issue      -> issue_fee
/// POST   /{id}/mark-paid  -> mark_fee_paid
/// POST   /{id}/payments   -> record_fee_payment
/// POST   /{id}/remind     -> send_fee_reminder
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fees::list_fees).post(fees::create_fee))
        .route("/{id}", get(fees::get_fee).delete(fees::delete_fee))
        .route("/{id}/issue", post(fees::issue_fee))
        .route("/{id}/mark-paid", post(fees::mark_fee_paid))
        .route("/{id}/payments", post(fees::record_fee_payment))
        .route("/{id}/remind", post(fees::send_fee_reminder))
}

/// Routes mounted at `/fee-types`.
///
/// ```text
/// GET    /        -> list_fee_types
/// POST   /        -> create_fee_type
/// ```
pub fn fee_types_router() -> Router<AppState> {
    Router::new().route("/", get(fees::list_fee_types).post(fees::create_fee_type))
}
