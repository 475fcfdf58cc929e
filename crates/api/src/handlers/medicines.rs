//! Handlers for the medicine stock list and dose units.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::hospital::prescription::validate_stock_level;
use regsuite_core::hospital::vitals::validate_dose_unit;
use regsuite_core::person::validate_name;
use regsuite_core::types::DbId;
use regsuite_db::models::medicine::{CreateDoseUnit, CreateMedicine, UpdateMedicine};
use regsuite_db::repositories::MedicineRepo;

use super::not_found;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/medicines
pub async fn list_medicines(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::MEDICINE, Operation::Read)?;
    let (limit, offset) = params.resolve();
    let medicines = MedicineRepo::list(&state.pool, limit, offset).await?;

    Ok(Json(DataResponse { data: medicines }))
}

/// POST /api/v1/medicines
pub async fn create_medicine(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMedicine>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::MEDICINE, Operation::Create)?;
    validate_name("Medicine name", &input.name)?;
    if let Some(qty) = input.qty_available {
        validate_stock_level(qty)?;
    }

    let medicine = MedicineRepo::create(&state.pool, &input).await?;

    tracing::info!(medicine_id = medicine.id, user_id = auth.user_id, "Medicine created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: medicine })))
}

/// GET /api/v1/medicines/{id}
pub async fn get_medicine(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::MEDICINE, Operation::Read)?;
    let medicine = MedicineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Medicine", id))?;

    Ok(Json(DataResponse { data: medicine }))
}

/// PUT /api/v1/medicines/{id}
pub async fn update_medicine(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMedicine>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::MEDICINE, Operation::Write)?;
    if let Some(name) = input.name.as_deref() {
        validate_name("Medicine name", name)?;
    }
    if let Some(qty) = input.qty_available {
        validate_stock_level(qty)?;
    }

    let medicine = MedicineRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Medicine", id))?;

    tracing::info!(medicine_id = id, qty_available = medicine.qty_available, user_id = auth.user_id, "Medicine updated");

    Ok(Json(DataResponse { data: medicine }))
}

/// DELETE /api/v1/medicines/{id}
///
/// Medicines still referenced by prescription lines cannot be removed.
pub async fn delete_medicine(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::MEDICINE, Operation::Unlink)?;
    if !MedicineRepo::delete(&state.pool, id).await? {
        return Err(not_found("Medicine", id));
    }

    tracing::info!(medicine_id = id, user_id = auth.user_id, "Medicine deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/dose-units
pub async fn list_dose_units(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::DOSE_UNIT, Operation::Read)?;
    let units = MedicineRepo::list_dose_units(&state.pool).await?;

    Ok(Json(DataResponse { data: units }))
}

/// POST /api/v1/dose-units
pub async fn create_dose_unit(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDoseUnit>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::DOSE_UNIT, Operation::Create)?;
    validate_dose_unit(&input.name, &input.description)?;

    let unit = MedicineRepo::create_dose_unit(&state.pool, &input).await?;

    tracing::info!(dose_unit_id = unit.id, user_id = auth.user_id, "Dose unit created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: unit })))
}

/// DELETE /api/v1/dose-units/{id}
pub async fn delete_dose_unit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::DOSE_UNIT, Operation::Unlink)?;
    if !MedicineRepo::delete_dose_unit(&state.pool, id).await? {
        return Err(not_found("Dose unit", id));
    }

    tracing::info!(dose_unit_id = id, user_id = auth.user_id, "Dose unit deleted");

    Ok(StatusCode::NO_CONTENT)
}
