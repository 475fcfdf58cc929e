//! Handlers for daily attendance.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::age::validate_not_future;
use regsuite_core::batch::{BatchReport, ItemOutcome};
use regsuite_core::error::CoreError;
use regsuite_core::school::attendance::{
    attendance_percentage, is_low_attendance, previous_week, AttendanceStatus,
};
use regsuite_core::types::{Date, DbId};
use regsuite_db::models::attendance::{
    AttendanceListParams, AttendanceSummary, BulkMarkAttendance, CreateAttendance,
    UpdateAttendance,
};
use regsuite_db::models::student::Student;
use regsuite_db::repositories::{AttendanceRepo, SchoolClassRepo, StudentRepo};
use serde::{Deserialize, Serialize};

use super::{check_choice, not_found};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::page;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/attendance
pub async fn list_attendance(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AttendanceListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ATTENDANCE, Operation::Read)?;
    let (limit, offset) = page(params.limit, params.offset);
    let records = AttendanceRepo::list(&state.pool, &params, limit, offset).await?;

    Ok(Json(DataResponse { data: records }))
}

/// POST /api/v1/attendance
///
/// One record per student per day; a second one is a conflict.
pub async fn record_attendance(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAttendance>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ATTENDANCE, Operation::Create)?;
    input.status.parse::<AttendanceStatus>()?;
    let today = Utc::now().date_naive();
    let date = input.date.unwrap_or(today);
    validate_not_future("Attendance date", date, today)?;
    StudentRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or_else(|| not_found("Student", input.student_id))?;

    let record = AttendanceRepo::create(&state.pool, date, &input).await?;

    tracing::info!(
        attendance_id = record.id,
        student_id = record.student_id,
        date = %record.date,
        status = %record.status,
        user_id = auth.user_id,
        "Attendance recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// PUT /api/v1/attendance/{id}
pub async fn update_attendance(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAttendance>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ATTENDANCE, Operation::Write)?;
    check_choice::<AttendanceStatus>(input.status.as_deref())?;

    let record = AttendanceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Attendance", id))?;

    tracing::info!(attendance_id = id, user_id = auth.user_id, "Attendance updated");

    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/attendance/mark-present
///
/// Mark every active student of a class present for the day. Records that
/// already exist are switched to present; records already present are
/// skipped.
pub async fn bulk_mark_present(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkMarkAttendance>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ATTENDANCE, Operation::Write)?;
    let today = Utc::now().date_naive();
    let date = input.date.unwrap_or(today);
    validate_not_future("Attendance date", date, today)?;
    SchoolClassRepo::find_by_id(&state.pool, input.class_id)
        .await?
        .ok_or_else(|| not_found("Class", input.class_id))?;

    let students = StudentRepo::list_active(&state.pool, Some(input.class_id)).await?;
    let existing: HashMap<DbId, (DbId, String)> = AttendanceRepo::list(
        &state.pool,
        &AttendanceListParams {
            student_id: None,
            class_id: Some(input.class_id),
            date: Some(date),
            limit: None,
            offset: None,
        },
        students.len() as i64 + 1,
        0,
    )
    .await?
    .into_iter()
    .map(|a| (a.student_id, (a.id, a.status)))
    .collect();

    let mut report = BatchReport::default();
    for student in &students {
        let result = mark_present(&state, student, date, existing.get(&student.id)).await;
        if let Err(ref e) = result {
            tracing::error!(student_id = student.id, error = %e, "Failed to mark attendance");
        }
        report.record(&result);
    }

    tracing::info!(
        class_id = input.class_id,
        date = %date,
        affected = report.affected,
        skipped = report.skipped,
        failed = report.failed,
        user_id = auth.user_id,
        "Class marked present",
    );

    Ok(Json(DataResponse { data: report }))
}

async fn mark_present(
    state: &AppState,
    student: &Student,
    date: Date,
    existing: Option<&(DbId, String)>,
) -> Result<ItemOutcome, sqlx::Error> {
    let present = AttendanceStatus::BULK_MARK.as_str();
    match existing {
        Some((_, status)) if status == present => Ok(ItemOutcome::Skipped),
        Some((id, _)) => {
            let update = UpdateAttendance {
                status: Some(present.to_string()),
                remarks: None,
            };
            AttendanceRepo::update(&state.pool, *id, &update).await?;
            Ok(ItemOutcome::Affected)
        }
        None => {
            if AttendanceRepo::create_if_absent(&state.pool, student, date, present).await? {
                Ok(ItemOutcome::Affected)
            } else {
                Ok(ItemOutcome::Skipped)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceSummaryRow {
    #[serde(flatten)]
    pub summary: AttendanceSummary,
    pub percentage: Option<f64>,
    pub low_attendance: bool,
}

impl From<AttendanceSummary> for AttendanceSummaryRow {
    fn from(summary: AttendanceSummary) -> Self {
        Self {
            percentage: attendance_percentage(summary.present_days, summary.total_days),
            low_attendance: is_low_attendance(summary.present_days, summary.total_days),
            summary,
        }
    }
}

/// GET /api/v1/attendance/summary
///
/// Per-student totals; defaults to last week (Monday to Sunday).
pub async fn attendance_summary(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::ATTENDANCE, Operation::Read)?;
    let (default_from, default_to) = previous_week(Utc::now().date_naive());
    let from = params.date_from.unwrap_or(default_from);
    let to = params.date_to.unwrap_or(default_to);
    if from > to {
        return Err(CoreError::Validation(format!(
            "date_from ({from}) must not be after date_to ({to})"
        ))
        .into());
    }

    let rows: Vec<AttendanceSummaryRow> = AttendanceRepo::summarize(&state.pool, from, to)
        .await?
        .into_iter()
        .map(AttendanceSummaryRow::from)
        .collect();

    Ok(Json(DataResponse { data: rows }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(present: i64, total: i64) -> AttendanceSummary {
        AttendanceSummary {
            student_id: 1,
            student_name: "Ama Mensah".into(),
            parent_email: None,
            total_days: total,
            present_days: present,
        }
    }

    #[test]
    fn summary_row_flags_low_attendance() {
        let row = AttendanceSummaryRow::from(summary(2, 5));
        assert_eq!(row.percentage, Some(40.0));
        assert!(row.low_attendance);

        let row = AttendanceSummaryRow::from(summary(5, 5));
        assert!(!row.low_attendance);
    }

    #[test]
    fn summary_row_without_records_has_no_percentage() {
        let row = AttendanceSummaryRow::from(summary(0, 0));
        assert_eq!(row.percentage, None);
        assert!(!row.low_attendance);
    }
}
