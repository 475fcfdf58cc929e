//! Teacher model and DTOs.

use regsuite_core::person;
use regsuite_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `teachers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Teacher {
    pub id: DbId,
    pub teacher_id: String,
    pub first_name: String,
    pub last_name: String,
    pub qualification: Option<String>,
    pub specialization: Option<String>,
    pub joining_date: Date,
    pub experience_years: i32,
    pub is_class_teacher: bool,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeacherView {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub display_name: String,
}

impl From<Teacher> for TeacherView {
    fn from(teacher: Teacher) -> Self {
        let display_name = person::display_name(&teacher.first_name, &teacher.last_name);
        Self {
            teacher,
            display_name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeacher {
    pub teacher_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub qualification: Option<String>,
    pub specialization: Option<String>,
    pub joining_date: Option<Date>,
    pub experience_years: Option<i32>,
    pub is_class_teacher: Option<bool>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeacher {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub qualification: Option<String>,
    pub specialization: Option<String>,
    pub experience_years: Option<i32>,
    pub is_class_teacher: Option<bool>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TeacherListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
