//! Timetable slots.

use regsuite_core::school::timetable::{self, Weekday};
use regsuite_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `timetable_slots`, joined with the subject name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimetableSlot {
    pub id: DbId,
    pub class_id: DbId,
    pub section_id: Option<DbId>,
    pub subject_id: DbId,
    pub subject_name: String,
    pub teacher_id: DbId,
    pub day_of_week: String,
    pub start_time: f64,
    pub end_time: f64,
    pub room: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimetableSlotView {
    #[serde(flatten)]
    pub slot: TimetableSlot,
    pub period_name: String,
}

impl From<TimetableSlot> for TimetableSlotView {
    fn from(slot: TimetableSlot) -> Self {
        let period_name = match slot.day_of_week.parse::<Weekday>() {
            Ok(day) => timetable::period_name(day, slot.start_time, &slot.subject_name),
            Err(_) => slot.subject_name.clone(),
        };
        Self { slot, period_name }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimetableSlot {
    pub class_id: DbId,
    pub section_id: Option<DbId>,
    pub subject_id: DbId,
    pub teacher_id: DbId,
    pub day_of_week: String,
    pub start_time: f64,
    pub end_time: f64,
    pub room: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TimetableListParams {
    pub class_id: Option<DbId>,
    pub teacher_id: Option<DbId>,
    pub day_of_week: Option<String>,
}
