//! School (SMIS) rules: students, classes, teachers, fees, attendance,
//! grades, timetable and the school reports.

pub mod attendance;
pub mod class;
pub mod fee;
pub mod grade;
pub mod reporting;
pub mod student;
pub mod timetable;
