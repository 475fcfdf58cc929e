//! Handlers for ICU beds.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::error::CoreError;
use regsuite_core::hospital::bed::{
    duplicate_name_error, ensure_deletable, validate_bed_name, BedStatus,
};
use regsuite_core::lifecycle::parse_state;
use regsuite_core::types::DbId;
use regsuite_db::models::icu_bed::{AssignBed, CreateIcuBed, IcuBed, IcuBedView, UpdateIcuBed};
use regsuite_db::repositories::{IcuBedRepo, PatientRepo};
use serde::Deserialize;

use super::{changed_concurrently, check_choice, check_transition, not_found};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BedListParams {
    pub status: Option<String>,
}

/// GET /api/v1/icu-beds
pub async fn list_beds(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<BedListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ICU_BED, Operation::Read)?;
    check_choice::<BedStatus>(params.status.as_deref())?;

    let beds: Vec<IcuBedView> = IcuBedRepo::list(&state.pool, params.status.as_deref())
        .await?
        .into_iter()
        .map(IcuBedView::from)
        .collect();

    Ok(Json(DataResponse { data: beds }))
}

/// POST /api/v1/icu-beds
pub async fn create_bed(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateIcuBed>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ICU_BED, Operation::Create)?;
    validate_bed_name(&input.name)?;
    ensure_name_free(&state, &input.name, None).await?;

    let bed = IcuBedRepo::create(&state.pool, &input).await?;

    tracing::info!(bed_id = bed.id, name = %bed.name, user_id = auth.user_id, "ICU bed created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: IcuBedView::from(bed) })))
}

/// GET /api/v1/icu-beds/{id}
pub async fn get_bed(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ICU_BED, Operation::Read)?;
    let bed = find(&state, id).await?;

    Ok(Json(DataResponse { data: IcuBedView::from(bed) }))
}

/// PUT /api/v1/icu-beds/{id}
pub async fn update_bed(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIcuBed>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ICU_BED, Operation::Write)?;
    if let Some(name) = input.name.as_deref() {
        validate_bed_name(name)?;
        ensure_name_free(&state, name, Some(id)).await?;
    }

    let bed = IcuBedRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("ICU bed", id))?;

    tracing::info!(bed_id = id, user_id = auth.user_id, "ICU bed updated");

    Ok(Json(DataResponse { data: IcuBedView::from(bed) }))
}

/// DELETE /api/v1/icu-beds/{id}
///
/// Booked beds cannot be deleted.
pub async fn delete_bed(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ICU_BED, Operation::Unlink)?;
    let bed = find(&state, id).await?;
    ensure_deletable(parse_state(&bed.status)?)?;

    if !IcuBedRepo::delete_unbooked(&state.pool, id).await? {
        return Err(changed_concurrently("ICU bed", id));
    }

    tracing::info!(bed_id = id, user_id = auth.user_id, "ICU bed deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/icu-beds/{id}/assign
pub async fn assign_bed(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignBed>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ICU_BED, Operation::Write)?;
    let bed = find(&state, id).await?;
    check_transition(&bed.status, BedStatus::Booked)?;
    PatientRepo::find_by_id(&state.pool, input.patient_id)
        .await?
        .ok_or_else(|| not_found("Patient", input.patient_id))?;

    let bed = IcuBedRepo::assign(&state.pool, id, input.patient_id)
        .await?
        .ok_or_else(|| changed_concurrently("ICU bed", id))?;

    tracing::info!(bed_id = id, patient_id = input.patient_id, user_id = auth.user_id, "ICU bed assigned");

    Ok(Json(DataResponse { data: IcuBedView::from(bed) }))
}

/// POST /api/v1/icu-beds/{id}/release
pub async fn release_bed(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ICU_BED, Operation::Write)?;
    let bed = find(&state, id).await?;
    if bed.status != BedStatus::Booked.as_str() {
        return Err(CoreError::Validation(format!("ICU bed '{}' is not booked", bed.name)).into());
    }

    let bed = IcuBedRepo::release(&state.pool, id)
        .await?
        .ok_or_else(|| changed_concurrently("ICU bed", id))?;

    tracing::info!(bed_id = id, user_id = auth.user_id, "ICU bed released");

    Ok(Json(DataResponse { data: IcuBedView::from(bed) }))
}

#[derive(Debug, Deserialize)]
pub struct BedStatusChange {
    pub status: String,
}

/// POST /api/v1/icu-beds/{id}/status
///
/// Put an available bed into maintenance or bring it back.
pub async fn change_bed_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<BedStatusChange>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ICU_BED, Operation::Write)?;
    let to: BedStatus = parse_state(&input.status)?;
    let bed = find(&state, id).await?;
    let from = check_transition(&bed.status, to)?;
    if from == BedStatus::Booked.as_str() || to == BedStatus::Booked {
        return Err(CoreError::Validation(
            "Use the assign and release actions to book or free a bed".into(),
        )
        .into());
    }

    let bed = IcuBedRepo::set_status(&state.pool, id, from, to.as_str())
        .await?
        .ok_or_else(|| changed_concurrently("ICU bed", id))?;

    tracing::info!(bed_id = id, from, to = %to, user_id = auth.user_id, "ICU bed status changed");

    Ok(Json(DataResponse { data: IcuBedView::from(bed) }))
}

async fn find(state: &AppState, id: DbId) -> AppResult<IcuBed> {
    IcuBedRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("ICU bed", id))
}

/// Bed names are unique; `own_id` is the bed being renamed.
async fn ensure_name_free(state: &AppState, name: &str, own_id: Option<DbId>) -> AppResult<()> {
    if let Some(existing) = IcuBedRepo::find_by_name(&state.pool, name.trim()).await? {
        if Some(existing.id) != own_id {
            return Err(duplicate_name_error(name.trim()).into());
        }
    }
    Ok(())
}
