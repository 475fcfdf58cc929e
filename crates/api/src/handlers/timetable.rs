//! Handlers for timetable slots.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::school::timetable::{validate_slot, Weekday};
use regsuite_core::types::DbId;
use regsuite_db::models::timetable::{
    CreateTimetableSlot, TimetableListParams, TimetableSlotView,
};
use regsuite_db::repositories::{SchoolClassRepo, TeacherRepo, TimetableRepo};

use super::{check_choice, not_found};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/timetable
pub async fn list_slots(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TimetableListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::TIMETABLE, Operation::Read)?;
    check_choice::<Weekday>(params.day_of_week.as_deref())?;

    let slots: Vec<TimetableSlotView> = TimetableRepo::list(&state.pool, &params)
        .await?
        .into_iter()
        .map(TimetableSlotView::from)
        .collect();

    Ok(Json(DataResponse { data: slots }))
}

/// POST /api/v1/timetable
pub async fn create_slot(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTimetableSlot>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::TIMETABLE, Operation::Create)?;
    input.day_of_week.parse::<Weekday>()?;
    validate_slot(input.start_time, input.end_time)?;
    SchoolClassRepo::find_by_id(&state.pool, input.class_id)
        .await?
        .ok_or_else(|| not_found("Class", input.class_id))?;
    TeacherRepo::find_by_id(&state.pool, input.teacher_id)
        .await?
        .ok_or_else(|| not_found("Teacher", input.teacher_id))?;

    let slot = TimetableSlotView::from(TimetableRepo::create(&state.pool, &input).await?);

    tracing::info!(
        slot_id = slot.slot.id,
        period = %slot.period_name,
        user_id = auth.user_id,
        "Timetable slot created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: slot })))
}

/// DELETE /api/v1/timetable/{id}
pub async fn delete_slot(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::TIMETABLE, Operation::Unlink)?;
    if !TimetableRepo::delete(&state.pool, id).await? {
        return Err(not_found("Timetable slot", id));
    }

    tracing::info!(slot_id = id, user_id = auth.user_id, "Timetable slot deleted");

    Ok(StatusCode::NO_CONTENT)
}
