//! Student model and DTOs.

use regsuite_core::types::{Date, DbId, Timestamp};
use regsuite_core::{age, person};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub gender: String,
    pub class_id: Option<DbId>,
    pub section_id: Option<DbId>,
    pub academic_year_id: DbId,
    pub roll_number: i32,
    pub enrollment_date: Date,
    pub parent_name: Option<String>,
    pub parent_email: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub blood_group: Option<String>,
    pub medical_conditions: Option<String>,
    pub allergies: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Student with display name and age in whole years.
#[derive(Debug, Clone, Serialize)]
pub struct StudentView {
    #[serde(flatten)]
    pub student: Student,
    pub display_name: String,
    pub age: i32,
}

impl StudentView {
    pub fn new(student: Student, today: Date) -> Self {
        let display_name = person::display_name(&student.first_name, &student.last_name);
        let age = age::approximate_years(Some(student.date_of_birth), today);
        Self {
            student,
            display_name,
            age,
        }
    }
}

/// DTO for enrolling a student. The academic year defaults to the current
/// one and the roll number to the next free number in the class.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub student_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub gender: String,
    pub class_id: Option<DbId>,
    pub section_id: Option<DbId>,
    pub academic_year_id: Option<DbId>,
    pub roll_number: Option<i32>,
    pub enrollment_date: Option<Date>,
    pub parent_name: Option<String>,
    pub parent_email: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub blood_group: Option<String>,
    pub medical_conditions: Option<String>,
    pub allergies: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudent {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub section_id: Option<DbId>,
    pub parent_name: Option<String>,
    pub parent_email: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub blood_group: Option<String>,
    pub medical_conditions: Option<String>,
    pub allergies: Option<String>,
}

/// Body of the status change action.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeStudentStatus {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct StudentListParams {
    pub class_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
