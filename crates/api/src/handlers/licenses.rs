//! Handlers for operator licenses and the expiring-licenses report.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use regsuite_core::acl::{entity, Operation};
use regsuite_core::lifecycle::parse_state;
use regsuite_core::operator::{self as rules, LicenseStatus, LicenseType};
use regsuite_core::sequence;
use regsuite_core::types::{Date, DbId};
use regsuite_db::models::license::{CreateLicense, LicenseListParams, UpdateLicense};
use regsuite_db::repositories::{LicenseRepo, OperatorRepo, SequenceRepo};
use regsuite_events::bus::LICENSE_STATUS_CHANGED;
use regsuite_events::RecordEvent;
use serde::{Deserialize, Serialize};

use super::operators::StatusChange;
use super::{changed_concurrently, check_choice, check_transition, not_found};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::page;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/licenses
pub async fn list_licenses(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LicenseListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::LICENSE, Operation::Read)?;
    let (limit, offset) = page(params.limit, params.offset);
    let licenses = LicenseRepo::list(&state.pool, &params, limit, offset).await?;

    Ok(Json(DataResponse { data: licenses }))
}

/// POST /api/v1/licenses
pub async fn create_license(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateLicense>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::LICENSE, Operation::Create)?;
    input.license_type.parse::<LicenseType>()?;
    rules::validate_license_dates(input.issue_date, input.expiry_date)?;
    validate_money(input.fee_amount, input.currency.as_deref())?;

    OperatorRepo::find_by_id(&state.pool, input.operator_id)
        .await?
        .ok_or_else(|| not_found("Operator", input.operator_id))?;

    let number = SequenceRepo::assign(
        &state.pool,
        &sequence::LICENSE,
        input.license_number.as_deref(),
    )
    .await?;
    let license = LicenseRepo::create(&state.pool, &number, &auth.login(), &input).await?;

    tracing::info!(
        license_id = license.id,
        license_number = %license.license_number,
        operator_id = license.operator_id,
        user_id = auth.user_id,
        "License created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: license })))
}

/// GET /api/v1/licenses/{id}
pub async fn get_license(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::LICENSE, Operation::Read)?;
    let license = LicenseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("License", id))?;

    Ok(Json(DataResponse { data: license }))
}

/// PUT /api/v1/licenses/{id}
///
/// Issue and expiry dates are checked against each other after merging the
/// patch with the stored values.
pub async fn update_license(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLicense>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::LICENSE, Operation::Write)?;
    check_choice::<LicenseType>(input.license_type.as_deref())?;
    validate_money(input.fee_amount, input.currency.as_deref())?;

    let current = LicenseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("License", id))?;
    rules::validate_license_dates(
        input.issue_date.or(current.issue_date),
        input.expiry_date.or(current.expiry_date),
    )?;

    let license = LicenseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("License", id))?;

    tracing::info!(license_id = id, user_id = auth.user_id, "License updated");

    Ok(Json(DataResponse { data: license }))
}

/// DELETE /api/v1/licenses/{id}
pub async fn delete_license(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::LICENSE, Operation::Unlink)?;
    if !LicenseRepo::delete(&state.pool, id).await? {
        return Err(not_found("License", id));
    }

    tracing::info!(license_id = id, user_id = auth.user_id, "License deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/licenses/{id}/status
///
/// Expire, suspend, reinstate or revoke a license. The change is posted on
/// the license as a notification.
pub async fn change_license_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusChange>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::LICENSE, Operation::Write)?;
    let to: LicenseStatus = parse_state(&input.status)?;

    let current = LicenseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("License", id))?;
    let from = check_transition(&current.status, to)?;

    let license = LicenseRepo::set_status(&state.pool, id, from, to.as_str())
        .await?
        .ok_or_else(|| changed_concurrently("License", id))?;

    state.event_bus.publish(
        RecordEvent::new(
            LICENSE_STATUS_CHANGED,
            entity::LICENSE,
            id,
            format!("License {} is now {to}", license.license_number),
        )
        .with_actor(auth.user_id)
        .with_payload(serde_json::json!({ "from": from, "to": to.as_str() })),
    );

    tracing::info!(license_id = id, from, to = %to, user_id = auth.user_id, "License status changed");

    Ok(Json(DataResponse { data: license }))
}

/// Query parameters for `GET /licenses/expiring`.
#[derive(Debug, Deserialize)]
pub struct ExpiringParams {
    /// Window in days (default: the reminder window).
    pub days: Option<i64>,
}

/// One line of the expiring-licenses report.
#[derive(Debug, Serialize)]
pub struct ExpiringLicenseRow {
    pub license_id: DbId,
    pub license_number: String,
    pub license_type: String,
    pub operator_id: DbId,
    pub operator: String,
    pub expiry_date: Date,
    /// Negative once the license has expired.
    pub days_remaining: i64,
    /// Whether the daily reminder job picks this license up.
    pub reminder_due: bool,
}

/// GET /api/v1/licenses/expiring
///
/// Active licenses whose expiry falls before today plus the window.
pub async fn expiring_licenses(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ExpiringParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::LICENSE, Operation::Read)?;
    let days = params.days.unwrap_or(rules::EXPIRY_REMINDER_WINDOW_DAYS).max(0);
    let today = Utc::now().date_naive();

    let rows: Vec<ExpiringLicenseRow> =
        LicenseRepo::list_expiring_before(&state.pool, today + Duration::days(days))
            .await?
            .into_iter()
            .map(|l| ExpiringLicenseRow {
                license_id: l.id,
                operator: rules::display_name(l.partner_name.as_deref(), &l.operator_code),
                days_remaining: rules::days_until_expiry(l.expiry_date, today),
                reminder_due: rules::is_expiring_soon(
                    LicenseStatus::Active,
                    Some(l.expiry_date),
                    today,
                    rules::EXPIRY_REMINDER_WINDOW_DAYS,
                ),
                license_number: l.license_number,
                license_type: l.license_type,
                operator_id: l.operator_id,
                expiry_date: l.expiry_date,
            })
            .collect();

    Ok(Json(DataResponse { data: rows }))
}

fn validate_money(
    amount: Option<f64>,
    currency: Option<&str>,
) -> Result<(), regsuite_core::error::CoreError> {
    if let Some(amount) = amount {
        rules::validate_amount("Fee amount", amount)?;
    }
    if let Some(currency) = currency {
        rules::validate_currency(currency)?;
    }
    Ok(())
}
