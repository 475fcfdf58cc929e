//! Route definitions for UAF declarations and their payments.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::uaf;
use crate::state::AppState;

/// Routes mounted at `/uaf-declarations`.
///
/// ```text
/// GET    /                    -> list_declarations
/// POST   /                    -> create_declaration
/// POST   /invoice             -> generate_invoices (verified -> invoiced)
/// GET    /{id}                -> get_declaration
/// PUT    /{id}                -> update_declaration (draft only)
/// DELETE /{id}                -> delete_declaration (draft only)
/// POST   /{id}/verify         -> verify_declaration
/// POST   /{id}/mark-paid      -> mark_declaration_paid
/// GET    /{id}/payments       -> list_payments
/// POST   /{id}/payments       -> add_payment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(uaf::list_declarations).post(uaf::create_declaration))
        .route("/invoice", post(uaf::generate_invoices))
        .route(
            "/{id}",
            get(uaf::get_declaration)
                .put(uaf::update_declaration)
                .delete(uaf::delete_declaration),
        )
        .route("/{id}/verify", post(uaf::verify_declaration))
        .route("/{id}/mark-paid", post(uaf::mark_declaration_paid))
        .route("/{id}/payments", get(uaf::list_payments).post(uaf::add_payment))
}
