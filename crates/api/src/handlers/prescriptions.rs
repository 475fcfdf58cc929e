//! Handlers for prescriptions: confirmation checks stock, dispensing
//! decrements it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::error::CoreError;
use regsuite_core::hospital::prescription::{
    check_stock, ensure_has_lines, validate_quantity, PrescriptionState, StockLine,
};
use regsuite_core::types::DbId;
use regsuite_db::models::prescription::{
    CreatePrescription, Prescription, PrescriptionListParams, PrescriptionWithLines,
};
use regsuite_db::repositories::{DispenseOutcome, PrescriptionRepo};

use super::{changed_concurrently, check_transition, not_found};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::page;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/prescriptions
pub async fn list_prescriptions(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PrescriptionListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PRESCRIPTION, Operation::Read)?;
    let (limit, offset) = page(params.limit, params.offset);
    let prescriptions = PrescriptionRepo::list(&state.pool, &params, limit, offset).await?;

    Ok(Json(DataResponse { data: prescriptions }))
}

/// POST /api/v1/prescriptions
pub async fn create_prescription(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePrescription>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PRESCRIPTION, Operation::Create)?;
    for line in &input.lines {
        validate_quantity(line.quantity)?;
    }

    let created = PrescriptionRepo::create(&state.pool, &input).await?;

    tracing::info!(
        prescription_id = created.prescription.id,
        reference = %created.prescription.reference,
        lines = created.lines.len(),
        user_id = auth.user_id,
        "Prescription created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/prescriptions/{id}
pub async fn get_prescription(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PRESCRIPTION, Operation::Read)?;
    let prescription = find(&state, id).await?;
    let lines = PrescriptionRepo::list_lines(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: PrescriptionWithLines { prescription, lines },
    }))
}

/// DELETE /api/v1/prescriptions/{id}
///
/// Only draft or cancelled prescriptions can be deleted.
pub async fn delete_prescription(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PRESCRIPTION, Operation::Unlink)?;
    let current = find(&state, id).await?;
    if !PrescriptionRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Prescription {} is '{}'; only draft or cancelled prescriptions can be deleted",
            current.reference, current.state
        ))));
    }

    tracing::info!(prescription_id = id, user_id = auth.user_id, "Prescription deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/prescriptions/{id}/confirm
///
/// Every line must be coverable from current stock.
pub async fn confirm_prescription(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PRESCRIPTION, Operation::Write)?;
    let current = find(&state, id).await?;
    let from = check_transition(&current.state, PrescriptionState::Confirmed)?;

    let stock = PrescriptionRepo::line_stock(&state.pool, id).await?;
    ensure_has_lines(stock.len())?;
    let lines: Vec<StockLine> = stock
        .into_iter()
        .map(|s| StockLine {
            medicine_name: s.medicine_name,
            available: s.qty_available,
            required: s.quantity,
        })
        .collect();
    check_stock(&lines)?;

    let prescription = PrescriptionRepo::set_state(
        &state.pool,
        id,
        from,
        PrescriptionState::Confirmed.as_str(),
    )
    .await?
    .ok_or_else(|| changed_concurrently("Prescription", id))?;

    tracing::info!(prescription_id = id, user_id = auth.user_id, "Prescription confirmed");

    Ok(Json(DataResponse { data: prescription }))
}

/// POST /api/v1/prescriptions/{id}/dispense
///
/// Stock is re-checked and decremented in the same transaction that marks
/// the prescription dispensed.
pub async fn dispense_prescription(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PRESCRIPTION, Operation::Write)?;
    let current = find(&state, id).await?;
    check_transition(&current.state, PrescriptionState::Dispensed)?;

    let prescription = match PrescriptionRepo::dispense(&state.pool, id).await? {
        DispenseOutcome::Dispensed(p) => p,
        DispenseOutcome::NotConfirmed => return Err(changed_concurrently("Prescription", id)),
        DispenseOutcome::ShortStock(e) => return Err(e.into()),
    };

    tracing::info!(prescription_id = id, user_id = auth.user_id, "Prescription dispensed");

    Ok(Json(DataResponse { data: prescription }))
}

/// POST /api/v1/prescriptions/{id}/cancel
pub async fn cancel_prescription(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PRESCRIPTION, Operation::Write)?;
    let current = find(&state, id).await?;
    let from = check_transition(&current.state, PrescriptionState::Cancelled)?;

    let prescription = PrescriptionRepo::set_state(
        &state.pool,
        id,
        from,
        PrescriptionState::Cancelled.as_str(),
    )
    .await?
    .ok_or_else(|| changed_concurrently("Prescription", id))?;

    tracing::info!(prescription_id = id, user_id = auth.user_id, "Prescription cancelled");

    Ok(Json(DataResponse { data: prescription }))
}

async fn find(state: &AppState, id: DbId) -> AppResult<Prescription> {
    PrescriptionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Prescription", id))
}
