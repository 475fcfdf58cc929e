//! Handlers for classes, their sections and the subject catalogue.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::error::CoreError;
use regsuite_core::school::class::{validate_capacity, DEFAULT_CAPACITY};
use regsuite_core::types::DbId;
use regsuite_db::models::school_class::{
    CreateSchoolClass, CreateSection, CreateSubject, UpdateSchoolClass,
};
use regsuite_db::repositories::{SchoolClassRepo, TeacherRepo};

use super::not_found;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/classes
pub async fn list_classes(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::SCHOOL_CLASS, Operation::Read)?;
    let classes = SchoolClassRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: classes }))
}

/// POST /api/v1/classes
pub async fn create_class(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSchoolClass>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::SCHOOL_CLASS, Operation::Create)?;
    if input.name.trim().is_empty() || input.code.trim().is_empty() {
        return Err(CoreError::Validation("Class name and code are required".into()).into());
    }
    validate_capacity(input.capacity.unwrap_or(DEFAULT_CAPACITY))?;
    ensure_teacher(&state, input.class_teacher_id).await?;

    let class = SchoolClassRepo::create(&state.pool, &input).await?;

    tracing::info!(class_id = class.id, code = %class.code, user_id = auth.user_id, "Class created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: class })))
}

/// GET /api/v1/classes/{id}
pub async fn get_class(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::SCHOOL_CLASS, Operation::Read)?;
    let class = SchoolClassRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Class", id))?;

    Ok(Json(DataResponse { data: class }))
}

/// PUT /api/v1/classes/{id}
///
/// Capacity cannot drop below the number of active students.
pub async fn update_class(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSchoolClass>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::SCHOOL_CLASS, Operation::Write)?;
    let current = SchoolClassRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Class", id))?;
    if let Some(capacity) = input.capacity {
        validate_capacity(capacity)?;
        if current.current_students > i64::from(capacity) {
            return Err(CoreError::Conflict(format!(
                "Class {} has {} active students; capacity cannot be set to {capacity}",
                current.code, current.current_students
            ))
            .into());
        }
    }
    ensure_teacher(&state, input.class_teacher_id).await?;

    let class = SchoolClassRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Class", id))?;

    tracing::info!(class_id = id, user_id = auth.user_id, "Class updated");

    Ok(Json(DataResponse { data: class }))
}

/// DELETE /api/v1/classes/{id}
pub async fn delete_class(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::SCHOOL_CLASS, Operation::Unlink)?;
    if !SchoolClassRepo::delete(&state.pool, id).await? {
        return Err(not_found("Class", id));
    }

    tracing::info!(class_id = id, user_id = auth.user_id, "Class deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/classes/{id}/sections
pub async fn list_sections(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(class_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::SCHOOL_CLASS, Operation::Read)?;
    let sections = SchoolClassRepo::list_sections(&state.pool, class_id).await?;

    Ok(Json(DataResponse { data: sections }))
}

/// POST /api/v1/classes/{id}/sections
pub async fn create_section(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(class_id): Path<DbId>,
    Json(input): Json<CreateSection>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::SCHOOL_CLASS, Operation::Create)?;
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("Section name is required".into()).into());
    }
    SchoolClassRepo::find_by_id(&state.pool, class_id)
        .await?
        .ok_or_else(|| not_found("Class", class_id))?;
    ensure_teacher(&state, input.class_teacher_id).await?;

    let section = SchoolClassRepo::create_section(&state.pool, class_id, &input).await?;

    tracing::info!(class_id, section_id = section.id, user_id = auth.user_id, "Section created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: section })))
}

/// GET /api/v1/subjects
pub async fn list_subjects(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::SCHOOL_CLASS, Operation::Read)?;
    let subjects = SchoolClassRepo::list_subjects(&state.pool).await?;

    Ok(Json(DataResponse { data: subjects }))
}

/// POST /api/v1/subjects
pub async fn create_subject(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSubject>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::SCHOOL_CLASS, Operation::Create)?;
    if input.name.trim().is_empty() || input.code.trim().is_empty() {
        return Err(CoreError::Validation("Subject name and code are required".into()).into());
    }

    let subject = SchoolClassRepo::create_subject(&state.pool, &input).await?;

    tracing::info!(subject_id = subject.id, code = %subject.code, user_id = auth.user_id, "Subject created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: subject })))
}

async fn ensure_teacher(state: &AppState, teacher_id: Option<DbId>) -> AppResult<()> {
    if let Some(id) = teacher_id {
        TeacherRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| not_found("Teacher", id))?;
    }
    Ok(())
}
