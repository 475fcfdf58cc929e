//! Attendance records.

use regsuite_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `attendance` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub student_id: DbId,
    pub date: Date,
    pub status: String,
    pub class_id: Option<DbId>,
    pub section_id: Option<DbId>,
    pub remarks: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAttendance {
    pub student_id: DbId,
    pub date: Option<Date>,
    pub status: String,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAttendance {
    pub status: Option<String>,
    pub remarks: Option<String>,
}

/// Body of the bulk-mark action: every active student of the class is
/// marked present for the date.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkMarkAttendance {
    pub class_id: DbId,
    pub date: Option<Date>,
}

/// Per-student attendance totals over a date range.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceSummary {
    pub student_id: DbId,
    pub student_name: String,
    pub parent_email: Option<String>,
    pub total_days: i64,
    pub present_days: i64,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceListParams {
    pub student_id: Option<DbId>,
    pub class_id: Option<DbId>,
    pub date: Option<Date>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
