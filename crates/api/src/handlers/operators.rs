//! Handlers for operator profiles.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::lifecycle::parse_state;
use regsuite_core::operator::{self as rules, OperatorStatus, OperatorType};
use regsuite_core::sequence;
use regsuite_core::types::DbId;
use regsuite_db::models::operator::{
    CreateOperator, OperatorListParams, OperatorView, UpdateOperator,
};
use regsuite_db::repositories::{OperatorRepo, SequenceRepo};
use serde::Deserialize;

use super::{changed_concurrently, check_choice, check_transition, not_found};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::page;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of the status action endpoints (operators and licenses).
#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: String,
}

/// GET /api/v1/operators
pub async fn list_operators(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<OperatorListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::OPERATOR, Operation::Read)?;
    let (limit, offset) = page(params.limit, params.offset);

    let operators: Vec<OperatorView> = OperatorRepo::list(&state.pool, &params, limit, offset)
        .await?
        .into_iter()
        .map(OperatorView::from)
        .collect();

    Ok(Json(DataResponse { data: operators }))
}

/// POST /api/v1/operators
///
/// Draws an `OP` code from the operator counter unless one is supplied.
pub async fn create_operator(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateOperator>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::OPERATOR, Operation::Create)?;
    validate_profile(Some(&input.operator_type), input.uaf_rate)?;

    let code = SequenceRepo::assign(
        &state.pool,
        &sequence::OPERATOR,
        input.operator_code.as_deref(),
    )
    .await?;
    let operator = OperatorRepo::create(&state.pool, &code, &auth.login(), &input).await?;

    tracing::info!(
        operator_id = operator.id,
        operator_code = %operator.operator_code,
        user_id = auth.user_id,
        "Operator created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: OperatorView::from(operator) })))
}

/// GET /api/v1/operators/{id}
pub async fn get_operator(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::OPERATOR, Operation::Read)?;
    let operator = OperatorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Operator", id))?;

    Ok(Json(DataResponse { data: OperatorView::from(operator) }))
}

/// PUT /api/v1/operators/{id}
pub async fn update_operator(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOperator>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::OPERATOR, Operation::Write)?;
    validate_profile(input.operator_type.as_deref(), input.uaf_rate)?;

    let operator = OperatorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Operator", id))?;

    tracing::info!(operator_id = id, user_id = auth.user_id, "Operator updated");

    Ok(Json(DataResponse { data: OperatorView::from(operator) }))
}

/// DELETE /api/v1/operators/{id}
///
/// Licenses of the operator are removed with it.
pub async fn delete_operator(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::OPERATOR, Operation::Unlink)?;
    if !OperatorRepo::delete(&state.pool, id).await? {
        return Err(not_found("Operator", id));
    }

    tracing::info!(operator_id = id, user_id = auth.user_id, "Operator deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/operators/{id}/status
///
/// Activate, suspend or revoke an operator.
pub async fn change_operator_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusChange>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::OPERATOR, Operation::Write)?;
    let to: OperatorStatus = parse_state(&input.status)?;

    let current = OperatorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Operator", id))?;
    let from = check_transition(&current.status, to)?;

    let operator = OperatorRepo::set_status(&state.pool, id, from, to.as_str())
        .await?
        .ok_or_else(|| changed_concurrently("Operator", id))?;

    tracing::info!(operator_id = id, from, to = %to, user_id = auth.user_id, "Operator status changed");

    Ok(Json(DataResponse { data: OperatorView::from(operator) }))
}

fn validate_profile(
    operator_type: Option<&str>,
    uaf_rate: Option<f64>,
) -> Result<(), regsuite_core::error::CoreError> {
    check_choice::<OperatorType>(operator_type)?;
    if let Some(rate) = uaf_rate {
        rules::validate_uaf_rate(rate)?;
    }
    Ok(())
}
