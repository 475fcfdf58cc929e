//! Academic year model.

use regsuite_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `academic_years` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AcademicYear {
    pub id: DbId,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub is_current: bool,
    /// Set once the end-of-year promotion has run for this year.
    pub promoted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAcademicYear {
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    #[serde(default)]
    pub is_current: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAcademicYear {
    pub name: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}
