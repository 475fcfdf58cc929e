//! Read-only school reports.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::school::grade::ExamType;
use regsuite_core::school::student::missing_current_year_error;
use regsuite_db::models::grade::ClassPerformanceParams;
use regsuite_db::repositories::{AcademicYearRepo, SchoolReportRepo};

use super::hospital_reports::DayParams;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/school/reports/daily
pub async fn daily_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<DayParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::REPORT, Operation::Read)?;
    let day = params.date.unwrap_or_else(|| Utc::now().date_naive());
    let report = SchoolReportRepo::daily_report(&state.pool, day).await?;

    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/school/reports/class-performance
///
/// Average grade percentage per class for one exam type, in the current
/// academic year unless one is given.
pub async fn class_performance(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ClassPerformanceParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::REPORT, Operation::Read)?;
    let exam_type: ExamType = params.exam_type.parse()?;
    let academic_year_id = match params.academic_year_id {
        Some(id) => id,
        None => {
            AcademicYearRepo::find_current(&state.pool)
                .await?
                .ok_or_else(missing_current_year_error)?
                .id
        }
    };

    let rows =
        SchoolReportRepo::class_performance(&state.pool, academic_year_id, exam_type.as_str())
            .await?;

    Ok(Json(DataResponse { data: rows }))
}
