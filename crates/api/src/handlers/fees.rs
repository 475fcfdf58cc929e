//! Handlers for fee types, fees and fee payments.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::activity::ActivityType;
use regsuite_core::error::CoreError;
use regsuite_core::lifecycle::parse_state;
use regsuite_core::school::fee::{
    apply_payment, balance, validate_fee_amount, FeeState, PaymentMethod, Recurrence,
};
use regsuite_core::school::student::missing_current_year_error;
use regsuite_core::types::DbId;
use regsuite_db::models::activity::CreateActivity;
use regsuite_db::models::fee::{
    CreateFee, CreateFeeType, Fee, FeeListParams, FeeView, RecordPayment,
};
use regsuite_db::repositories::{AcademicYearRepo, ActivityRepo, FeeRepo, StudentRepo};

use super::{changed_concurrently, check_choice, check_transition, not_found};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::page;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Fee types
// ---------------------------------------------------------------------------

/// GET /api/v1/fee-types
pub async fn list_fee_types(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::FEE, Operation::Read)?;
    let types = FeeRepo::list_types(&state.pool).await?;

    Ok(Json(DataResponse { data: types }))
}

/// POST /api/v1/fee-types
pub async fn create_fee_type(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateFeeType>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::FEE, Operation::Create)?;
    if input.name.trim().is_empty() || input.code.trim().is_empty() {
        return Err(CoreError::Validation("Fee type name and code are required".into()).into());
    }
    validate_fee_amount(input.amount)?;
    check_choice::<Recurrence>(input.recurrence.as_deref())?;
    if input.is_recurring && input.recurrence.is_none() {
        return Err(CoreError::Validation("Recurring fee types need a recurrence".into()).into());
    }

    let fee_type = FeeRepo::create_type(&state.pool, &input).await?;

    tracing::info!(fee_type_id = fee_type.id, code = %fee_type.code, user_id = auth.user_id, "Fee type created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: fee_type })))
}

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

/// GET /api/v1/fees
pub async fn list_fees(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<FeeListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::FEE, Operation::Read)?;
    check_choice::<FeeState>(params.state.as_deref())?;
    let (limit, offset) = page(params.limit, params.offset);

    let fees: Vec<FeeView> = FeeRepo::list(&state.pool, &params, limit, offset)
        .await?
        .into_iter()
        .map(FeeView::from)
        .collect();

    Ok(Json(DataResponse { data: fees }))
}

/// POST /api/v1/fees
///
/// The amount defaults to the fee type's amount and the academic year to the
/// current one.
pub async fn create_fee(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateFee>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::FEE, Operation::Create)?;
    StudentRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or_else(|| not_found("Student", input.student_id))?;
    let fee_type = FeeRepo::find_type(&state.pool, input.fee_type_id)
        .await?
        .ok_or_else(|| not_found("Fee type", input.fee_type_id))?;
    let amount = input.amount.unwrap_or(fee_type.amount);
    validate_fee_amount(amount)?;

    let academic_year_id = match input.academic_year_id {
        Some(id) => id,
        None => {
            AcademicYearRepo::find_current(&state.pool)
                .await?
                .ok_or_else(missing_current_year_error)?
                .id
        }
    };

    let fee = FeeRepo::create(
        &state.pool,
        input.reference.as_deref(),
        input.student_id,
        academic_year_id,
        fee_type.id,
        amount,
        input.due_date,
    )
    .await?;

    tracing::info!(
        fee_id = fee.id,
        reference = %fee.reference,
        student_id = fee.student_id,
        amount = fee.amount,
        user_id = auth.user_id,
        "Fee raised",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: FeeView::from(fee) })))
}

/// GET /api/v1/fees/{id}
pub async fn get_fee(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::FEE, Operation::Read)?;
    let fee = find(&state, id).await?;

    Ok(Json(DataResponse { data: FeeView::from(fee) }))
}

/// DELETE /api/v1/fees/{id}
///
/// Only draft fees can be deleted.
pub async fn delete_fee(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::FEE, Operation::Unlink)?;
    let fee = find(&state, id).await?;
    if fee.state != FeeState::Draft.as_str() {
        return Err(CoreError::Conflict(format!(
            "Fee {} is {} and can no longer be deleted",
            fee.reference, fee.state
        ))
        .into());
    }
    if !FeeRepo::delete_draft(&state.pool, id).await? {
        return Err(changed_concurrently("Fee", id));
    }

    tracing::info!(fee_id = id, user_id = auth.user_id, "Fee deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/fees/{id}/issue
///
/// draft -> due.
pub async fn issue_fee(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::FEE, Operation::Write)?;
    let fee = find(&state, id).await?;
    let from = check_transition(&fee.state, FeeState::Due)?;

    let fee = FeeRepo::set_state(&state.pool, id, from, FeeState::Due.as_str())
        .await?
        .ok_or_else(|| changed_concurrently("Fee", id))?;

    tracing::info!(fee_id = id, user_id = auth.user_id, "Fee issued");

    Ok(Json(DataResponse { data: FeeView::from(fee) }))
}

/// POST /api/v1/fees/{id}/mark-paid
///
/// Settles the whole amount, dated today.
pub async fn mark_fee_paid(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::FEE, Operation::Write)?;
    let fee = find(&state, id).await?;
    let from = check_transition(&fee.state, FeeState::Paid)?;

    let fee = FeeRepo::mark_paid(&state.pool, id, from, Utc::now().date_naive())
        .await?
        .ok_or_else(|| changed_concurrently("Fee", id))?;

    tracing::info!(fee_id = id, user_id = auth.user_id, "Fee marked paid");

    Ok(Json(DataResponse { data: FeeView::from(fee) }))
}

/// POST /api/v1/fees/{id}/payments
pub async fn record_fee_payment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RecordPayment>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::FEE, Operation::Write)?;
    let method: PaymentMethod = input.payment_method.parse()?;
    let fee = find(&state, id).await?;
    let current: FeeState = parse_state(&fee.state)?;

    let outcome = apply_payment(current, fee.amount, fee.paid_amount, input.amount)?;
    let payment_date = input.payment_date.unwrap_or_else(|| Utc::now().date_naive());

    let updated = FeeRepo::record_payment(
        &state.pool,
        id,
        current.as_str(),
        fee.paid_amount,
        outcome.paid_amount,
        outcome.state.as_str(),
        method.as_str(),
        payment_date,
    )
    .await?
    .ok_or_else(|| changed_concurrently("Fee", id))?;

    tracing::info!(
        fee_id = id,
        amount = input.amount,
        balance = balance(updated.amount, updated.paid_amount),
        state = %outcome.state,
        user_id = auth.user_id,
        "Fee payment recorded",
    );

    Ok(Json(DataResponse { data: FeeView::from(updated) }))
}

/// POST /api/v1/fees/{id}/remind
///
/// Schedule a payment reminder for an unsettled fee, due on the fee's due
/// date.
pub async fn send_fee_reminder(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::FEE, Operation::Write)?;
    let fee = find(&state, id).await?;
    let current: FeeState = parse_state(&fee.state)?;
    if matches!(current, FeeState::Draft | FeeState::Paid) {
        return Err(CoreError::Validation(format!(
            "Fee {} is {} and needs no reminder",
            fee.reference, fee.state
        ))
        .into());
    }

    let activity = ActivityRepo::create(
        &state.pool,
        &CreateActivity {
            entity_type: entity::FEE.to_string(),
            entity_id: fee.id,
            activity_type: ActivityType::Reminder.as_str().to_string(),
            summary: format!("Fee Payment Reminder: {}", fee.reference),
            note: Some(format!(
                "Outstanding balance of {:.2} due on {}",
                balance(fee.amount, fee.paid_amount),
                fee.due_date
            )),
            assigned_to: Some(auth.login()),
            due_date: Some(fee.due_date),
            dedupe_key: None,
        },
    )
    .await?;

    tracing::info!(fee_id = id, activity_id = activity.id, user_id = auth.user_id, "Fee reminder scheduled");

    Ok((StatusCode::CREATED, Json(DataResponse { data: activity })))
}

async fn find(state: &AppState, id: DbId) -> AppResult<Fee> {
    FeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Fee", id))
}
