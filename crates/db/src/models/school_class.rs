//! Class, section and subject models.

use regsuite_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `classes` table, with the live head count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SchoolClass {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub class_teacher_id: Option<DbId>,
    pub capacity: i32,
    /// Active students enrolled in the class.
    pub current_students: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSchoolClass {
    pub name: String,
    pub code: String,
    pub class_teacher_id: Option<DbId>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSchoolClass {
    pub name: Option<String>,
    pub class_teacher_id: Option<DbId>,
    pub capacity: Option<i32>,
}

/// A row from the `sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Section {
    pub id: DbId,
    pub name: String,
    pub class_id: DbId,
    pub class_teacher_id: Option<DbId>,
    pub room_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSection {
    pub name: String,
    pub class_teacher_id: Option<DbId>,
    pub room_number: Option<String>,
}

/// A row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubject {
    pub name: String,
    pub code: String,
}
