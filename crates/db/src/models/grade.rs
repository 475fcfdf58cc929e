//! Grade records.

use regsuite_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `grades` table. `percentage` and `grade` are computed on
/// write from the marks.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Grade {
    pub id: DbId,
    pub student_id: DbId,
    pub subject_id: DbId,
    pub academic_year_id: DbId,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub percentage: f64,
    pub grade: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGrade {
    pub student_id: DbId,
    pub subject_id: DbId,
    pub academic_year_id: Option<DbId>,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub total_marks: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGrade {
    pub marks_obtained: Option<f64>,
    pub total_marks: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct GradeListParams {
    pub student_id: Option<DbId>,
    pub exam_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ClassPerformanceParams {
    pub exam_type: String,
    pub academic_year_id: Option<DbId>,
}
