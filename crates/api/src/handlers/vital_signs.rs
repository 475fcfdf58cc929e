use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::age::validate_not_future;
use regsuite_core::hospital::vitals::validate_vitals;
use regsuite_core::types::DbId;
use regsuite_db::models::vital_sign::CreateVitalSign;
use regsuite_db::repositories::VitalSignRepo;

use super::not_found;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/vital-signs
///
/// Readings are listed per patient under `/patients/{id}/vital-signs`.
pub async fn record_vital_signs(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateVitalSign>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::VITAL_SIGN, Operation::Create)?;
    validate_vitals(
        input.temperature,
        input.pulse,
        input.respiration_rate,
        input.blood_pressure.as_deref(),
    )?;
    if let Some(date) = input.date {
        validate_not_future("Reading date", date, Utc::now().date_naive())?;
    }

    let vitals = VitalSignRepo::create(&state.pool, &input).await?;

    tracing::info!(vital_sign_id = vitals.id, patient_id = vitals.patient_id, user_id = auth.user_id, "Vital signs recorded");

    Ok((StatusCode::CREATED, Json(DataResponse { data: vitals })))
}

/// DELETE /api/v1/vital-signs/{id}
pub async fn delete_vital_signs(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::VITAL_SIGN, Operation::Unlink)?;
    if !VitalSignRepo::delete(&state.pool, id).await? {
        return Err(not_found("Vital sign", id));
    }

    tracing::info!(vital_sign_id = id, user_id = auth.user_id, "Vital signs deleted");

    Ok(StatusCode::NO_CONTENT)
}
