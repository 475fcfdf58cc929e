//! Handlers for universal-access-fund declarations, the invoicing wizard
//! and payments.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::error::CoreError;
use regsuite_core::operator::{self as rules, InvoiceWindow, UafState};
use regsuite_core::types::DbId;
use regsuite_db::models::uaf::{
    CreateUafDeclaration, CreateUafPayment, GenerateInvoices, UafDeclaration,
    UafDeclarationListParams, UpdateUafDeclaration,
};
use regsuite_db::repositories::{OperatorRepo, UafRepo};
use regsuite_events::bus::UAF_INVOICED;
use regsuite_events::RecordEvent;
use serde::Serialize;

use super::{changed_concurrently, check_transition, not_found};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::page;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/uaf-declarations
pub async fn list_declarations(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UafDeclarationListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::UAF_DECLARATION, Operation::Read)?;
    let (limit, offset) = page(params.limit, params.offset);
    let declarations = UafRepo::list(&state.pool, &params, limit, offset).await?;

    Ok(Json(DataResponse { data: declarations }))
}

/// POST /api/v1/uaf-declarations
pub async fn create_declaration(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateUafDeclaration>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::UAF_DECLARATION, Operation::Create)?;
    rules::validate_period(input.period_start, input.period_end)?;
    if let Some(amount) = input.declared_amount {
        rules::validate_amount("Declared amount", amount)?;
    }
    if let Some(currency) = input.currency.as_deref() {
        rules::validate_currency(currency)?;
    }
    OperatorRepo::find_by_id(&state.pool, input.operator_id)
        .await?
        .ok_or_else(|| not_found("Operator", input.operator_id))?;

    let declaration = UafRepo::create(&state.pool, &input).await?;

    tracing::info!(
        declaration_id = declaration.id,
        operator_id = declaration.operator_id,
        user_id = auth.user_id,
        "UAF declaration created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: declaration })))
}

/// GET /api/v1/uaf-declarations/{id}
pub async fn get_declaration(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::UAF_DECLARATION, Operation::Read)?;
    let declaration = find(&state, id).await?;

    Ok(Json(DataResponse { data: declaration }))
}

/// PUT /api/v1/uaf-declarations/{id}
///
/// Only drafts can be edited.
pub async fn update_declaration(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUafDeclaration>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::UAF_DECLARATION, Operation::Write)?;
    let current = find(&state, id).await?;
    ensure_draft(&current)?;

    rules::validate_period(
        input.period_start.unwrap_or(current.period_start),
        input.period_end.unwrap_or(current.period_end),
    )?;
    if let Some(amount) = input.declared_amount {
        rules::validate_amount("Declared amount", amount)?;
    }
    if let Some(currency) = input.currency.as_deref() {
        rules::validate_currency(currency)?;
    }

    let declaration = UafRepo::update_draft(&state.pool, id, &input)
        .await?
        .ok_or_else(|| changed_concurrently("UAF declaration", id))?;

    tracing::info!(declaration_id = id, user_id = auth.user_id, "UAF declaration updated");

    Ok(Json(DataResponse { data: declaration }))
}

/// DELETE /api/v1/uaf-declarations/{id}
///
/// Only drafts can be deleted; payments go with the declaration.
pub async fn delete_declaration(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::UAF_DECLARATION, Operation::Unlink)?;
    let current = find(&state, id).await?;
    ensure_draft(&current)?;

    if !UafRepo::delete_draft(&state.pool, id).await? {
        return Err(changed_concurrently("UAF declaration", id));
    }

    tracing::info!(declaration_id = id, user_id = auth.user_id, "UAF declaration deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/uaf-declarations/{id}/verify
pub async fn verify_declaration(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::UAF_DECLARATION, Operation::Write)?;
    let declaration = move_declaration(&state, id, UafState::Verified).await?;

    tracing::info!(declaration_id = id, user_id = auth.user_id, "UAF declaration verified");

    Ok(Json(DataResponse { data: declaration }))
}

/// POST /api/v1/uaf-declarations/{id}/mark-paid
pub async fn mark_declaration_paid(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::UAF_DECLARATION, Operation::Write)?;
    let declaration = move_declaration(&state, id, UafState::Paid).await?;

    tracing::info!(declaration_id = id, user_id = auth.user_id, "UAF declaration paid");

    Ok(Json(DataResponse { data: declaration }))
}

/// Result of the invoicing wizard.
#[derive(Debug, Serialize)]
pub struct InvoiceResult {
    pub count: usize,
    pub declarations: Vec<UafDeclaration>,
}

/// POST /api/v1/uaf-declarations/invoice
///
/// Moves every verified declaration whose period lies within
/// `[date_from, date_to]` (restricted to `operator_ids` when given) to
/// `invoiced`. Running it again over the same window invoices nothing.
pub async fn generate_invoices(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<GenerateInvoices>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::UAF_DECLARATION, Operation::Write)?;
    let window = InvoiceWindow::new(input.date_from, input.date_to, input.operator_ids)?;

    let declarations = UafRepo::invoice_verified(&state.pool, &window).await?;
    for declaration in &declarations {
        state.event_bus.publish(
            RecordEvent::new(
                UAF_INVOICED,
                entity::UAF_DECLARATION,
                declaration.id,
                format!(
                    "Invoiced UAF declaration for {} to {}",
                    declaration.period_start, declaration.period_end
                ),
            )
            .with_actor(auth.user_id),
        );
    }

    tracing::info!(
        count = declarations.len(),
        date_from = %window.date_from,
        date_to = %window.date_to,
        user_id = auth.user_id,
        "UAF invoices generated",
    );

    Ok(Json(DataResponse {
        data: InvoiceResult {
            count: declarations.len(),
            declarations,
        },
    }))
}

/// GET /api/v1/uaf-declarations/{id}/payments
pub async fn list_payments(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::UAF_DECLARATION, Operation::Read)?;
    find(&state, id).await?;
    let payments = UafRepo::list_payments(&state.pool, id).await?;

    Ok(Json(DataResponse { data: payments }))
}

/// POST /api/v1/uaf-declarations/{id}/payments
///
/// Payments are recorded against invoiced (or already paid) declarations.
pub async fn add_payment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateUafPayment>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::UAF_DECLARATION, Operation::Write)?;
    rules::validate_amount("Payment amount", input.amount)?;
    if let Some(currency) = input.currency.as_deref() {
        rules::validate_currency(currency)?;
    }

    let declaration = find(&state, id).await?;
    let current: UafState = declaration.state.parse()?;
    if !matches!(current, UafState::Invoiced | UafState::Paid) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Payments can only be recorded on invoiced declarations (state is '{current}')"
        ))));
    }

    let payment = UafRepo::add_payment(&state.pool, id, &auth.login(), &input).await?;

    tracing::info!(declaration_id = id, payment_id = payment.id, user_id = auth.user_id, "UAF payment recorded");

    Ok((StatusCode::CREATED, Json(DataResponse { data: payment })))
}

async fn find(state: &AppState, id: DbId) -> AppResult<UafDeclaration> {
    UafRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("UAF declaration", id))
}

fn ensure_draft(declaration: &UafDeclaration) -> Result<(), CoreError> {
    if declaration.state != UafState::Draft.as_str() {
        return Err(CoreError::Conflict(format!(
            "UAF declaration {} is '{}'; only drafts can be changed",
            declaration.id, declaration.state
        )));
    }
    Ok(())
}

async fn move_declaration(state: &AppState, id: DbId, to: UafState) -> AppResult<UafDeclaration> {
    let current = find(state, id).await?;
    let from = check_transition(&current.state, to)?;

    UafRepo::set_state(&state.pool, id, from, to.as_str())
        .await?
        .ok_or_else(|| changed_concurrently("UAF declaration", id))
}
