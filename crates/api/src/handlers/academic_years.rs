//! Handlers for academic years.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::error::CoreError;
use regsuite_core::school::class::validate_academic_year;
use regsuite_core::school::student::missing_current_year_error;
use regsuite_core::types::DbId;
use regsuite_db::models::academic_year::{CreateAcademicYear, UpdateAcademicYear};
use regsuite_db::repositories::AcademicYearRepo;

use super::not_found;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/academic-years
pub async fn list_years(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ACADEMIC_YEAR, Operation::Read)?;
    let years = AcademicYearRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: years }))
}

/// GET /api/v1/academic-years/current
pub async fn current_year(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ACADEMIC_YEAR, Operation::Read)?;
    let year = AcademicYearRepo::find_current(&state.pool)
        .await?
        .ok_or_else(missing_current_year_error)?;

    Ok(Json(DataResponse { data: year }))
}

/// POST /api/v1/academic-years
pub async fn create_year(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAcademicYear>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ACADEMIC_YEAR, Operation::Create)?;
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("Academic year name is required".into()).into());
    }
    validate_academic_year(input.start_date, input.end_date)?;

    let year = AcademicYearRepo::create(&state.pool, &input).await?;

    tracing::info!(
        academic_year_id = year.id,
        name = %year.name,
        is_current = year.is_current,
        user_id = auth.user_id,
        "Academic year created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: year })))
}

/// GET /api/v1/academic-years/{id}
pub async fn get_year(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ACADEMIC_YEAR, Operation::Read)?;
    let year = AcademicYearRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Academic year", id))?;

    Ok(Json(DataResponse { data: year }))
}

/// PUT /api/v1/academic-years/{id}
pub async fn update_year(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAcademicYear>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ACADEMIC_YEAR, Operation::Write)?;
    let current = AcademicYearRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Academic year", id))?;
    validate_academic_year(
        input.start_date.unwrap_or(current.start_date),
        input.end_date.unwrap_or(current.end_date),
    )?;

    let year = AcademicYearRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Academic year", id))?;

    tracing::info!(academic_year_id = id, user_id = auth.user_id, "Academic year updated");

    Ok(Json(DataResponse { data: year }))
}

/// POST /api/v1/academic-years/{id}/set-current
///
/// Exactly one year is current; the previous one loses the flag.
pub async fn set_current_year(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ACADEMIC_YEAR, Operation::Write)?;
    let year = AcademicYearRepo::set_current(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Academic year", id))?;

    tracing::info!(academic_year_id = id, user_id = auth.user_id, "Current academic year changed");

    Ok(Json(DataResponse { data: year }))
}
