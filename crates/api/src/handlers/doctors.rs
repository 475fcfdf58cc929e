//! Handlers for the doctor directory.
//!
//! Anyone who can read appointments can look doctors up; maintaining the
//! directory is an admin task.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::person::validate_name;
use regsuite_core::types::DbId;
use regsuite_db::models::doctor::{CreateDoctor, UpdateDoctor};
use regsuite_db::repositories::DoctorRepo;

use super::not_found;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ActiveFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/doctors
pub async fn list_doctors(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<ActiveFilter>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::APPOINTMENT, Operation::Read)?;
    let doctors = DoctorRepo::list(&state.pool, filter.active_only).await?;

    Ok(Json(DataResponse { data: doctors }))
}

/// POST /api/v1/doctors
pub async fn create_doctor(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateDoctor>,
) -> AppResult<impl IntoResponse> {
    validate_name("Doctor name", &input.name)?;
    let doctor = DoctorRepo::create(&state.pool, &input).await?;

    tracing::info!(doctor_id = doctor.id, user_id = admin.user_id, "Doctor created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: doctor })))
}

/// GET /api/v1/doctors/{id}
pub async fn get_doctor(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::APPOINTMENT, Operation::Read)?;
    let doctor = DoctorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Doctor", id))?;

    Ok(Json(DataResponse { data: doctor }))
}

/// PUT /api/v1/doctors/{id}
pub async fn update_doctor(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDoctor>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = input.name.as_deref() {
        validate_name("Doctor name", name)?;
    }
    let doctor = DoctorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Doctor", id))?;

    tracing::info!(doctor_id = id, user_id = admin.user_id, "Doctor updated");

    Ok(Json(DataResponse { data: doctor }))
}
