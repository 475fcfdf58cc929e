//! Handlers for teachers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::person::{validate_contact_number, validate_name, validate_optional_email};
use regsuite_core::school::class::{Qualification, TeacherStatus};
use regsuite_core::types::DbId;
use regsuite_db::models::teacher::{CreateTeacher, TeacherListParams, TeacherView, UpdateTeacher};
use regsuite_db::repositories::TeacherRepo;

use super::{check_choice, not_found};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::page;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/teachers
pub async fn list_teachers(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TeacherListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::TEACHER, Operation::Read)?;
    check_choice::<TeacherStatus>(params.status.as_deref())?;
    let (limit, offset) = page(params.limit, params.offset);

    let teachers: Vec<TeacherView> = TeacherRepo::list(&state.pool, &params, limit, offset)
        .await?
        .into_iter()
        .map(TeacherView::from)
        .collect();

    Ok(Json(DataResponse { data: teachers }))
}

/// POST /api/v1/teachers
pub async fn create_teacher(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTeacher>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::TEACHER, Operation::Create)?;
    validate_name("First name", &input.first_name)?;
    validate_name("Last name", &input.last_name)?;
    check_choice::<Qualification>(input.qualification.as_deref())?;
    if let Some(phone) = input.phone.as_deref() {
        validate_contact_number(phone)?;
    }
    validate_optional_email(input.email.as_deref())?;

    let teacher = TeacherRepo::create(&state.pool, &input).await?;

    tracing::info!(
        teacher_pk = teacher.id,
        teacher_id = %teacher.teacher_id,
        user_id = auth.user_id,
        "Teacher created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: TeacherView::from(teacher) })))
}

/// GET /api/v1/teachers/{id}
pub async fn get_teacher(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::TEACHER, Operation::Read)?;
    let teacher = TeacherRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Teacher", id))?;

    Ok(Json(DataResponse { data: TeacherView::from(teacher) }))
}

/// PUT /api/v1/teachers/{id}
pub async fn update_teacher(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeacher>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::TEACHER, Operation::Write)?;
    if let Some(name) = input.first_name.as_deref() {
        validate_name("First name", name)?;
    }
    if let Some(name) = input.last_name.as_deref() {
        validate_name("Last name", name)?;
    }
    check_choice::<Qualification>(input.qualification.as_deref())?;
    check_choice::<TeacherStatus>(input.status.as_deref())?;
    if let Some(phone) = input.phone.as_deref() {
        validate_contact_number(phone)?;
    }
    validate_optional_email(input.email.as_deref())?;

    let teacher = TeacherRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Teacher", id))?;

    tracing::info!(teacher_pk = id, user_id = auth.user_id, "Teacher updated");

    Ok(Json(DataResponse { data: TeacherView::from(teacher) }))
}
