//! Handlers for exam grades.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::school::grade::{validate_marks, ExamType, DEFAULT_TOTAL_MARKS};
use regsuite_core::school::student::missing_current_year_error;
use regsuite_core::types::DbId;
use regsuite_db::models::grade::{CreateGrade, GradeListParams, UpdateGrade};
use regsuite_db::repositories::{AcademicYearRepo, GradeRepo, StudentRepo};

use super::{check_choice, not_found};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::page;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/grades
pub async fn list_grades(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<GradeListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::GRADE, Operation::Read)?;
    check_choice::<ExamType>(params.exam_type.as_deref())?;
    let (limit, offset) = page(params.limit, params.offset);
    let grades = GradeRepo::list(&state.pool, &params, limit, offset).await?;

    Ok(Json(DataResponse { data: grades }))
}

/// POST /api/v1/grades
///
/// Percentage and letter grade are computed from the marks.
pub async fn create_grade(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateGrade>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::GRADE, Operation::Create)?;
    let exam_type: ExamType = input.exam_type.parse()?;
    let total = input.total_marks.unwrap_or(DEFAULT_TOTAL_MARKS);
    validate_marks(input.marks_obtained, total)?;
    StudentRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or_else(|| not_found("Student", input.student_id))?;

    let academic_year_id = match input.academic_year_id {
        Some(id) => id,
        None => {
            AcademicYearRepo::find_current(&state.pool)
                .await?
                .ok_or_else(missing_current_year_error)?
                .id
        }
    };

    let grade = GradeRepo::create(
        &state.pool,
        input.student_id,
        input.subject_id,
        academic_year_id,
        exam_type.as_str(),
        input.marks_obtained,
        total,
    )
    .await?;

    tracing::info!(
        grade_id = grade.id,
        student_id = grade.student_id,
        exam_type = %exam_type,
        grade = %grade.grade,
        user_id = auth.user_id,
        "Grade recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: grade })))
}

/// GET /api/v1/grades/{id}
pub async fn get_grade(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::GRADE, Operation::Read)?;
    let grade = GradeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Grade", id))?;

    Ok(Json(DataResponse { data: grade }))
}

/// PUT /api/v1/grades/{id}
pub async fn update_grade(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGrade>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::GRADE, Operation::Write)?;
    let current = GradeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Grade", id))?;
    validate_marks(
        input.marks_obtained.unwrap_or(current.marks_obtained),
        input.total_marks.unwrap_or(current.total_marks),
    )?;

    let grade = GradeRepo::update(&state.pool, &current, &input)
        .await?
        .ok_or_else(|| not_found("Grade", id))?;

    tracing::info!(grade_id = id, grade = %grade.grade, user_id = auth.user_id, "Grade updated");

    Ok(Json(DataResponse { data: grade }))
}

/// DELETE /api/v1/grades/{id}
pub async fn delete_grade(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::GRADE, Operation::Unlink)?;
    if !GradeRepo::delete(&state.pool, id).await? {
        return Err(not_found("Grade", id));
    }

    tracing::info!(grade_id = id, user_id = auth.user_id, "Grade deleted");

    Ok(StatusCode::NO_CONTENT)
}
