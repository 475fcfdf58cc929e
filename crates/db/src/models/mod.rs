//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! State columns are plain `String`s; handlers parse them into the
//! `regsuite_core` enums before deciding on a transition.

pub mod academic_year;
pub mod activity;
pub mod appointment;
pub mod attendance;
pub mod doctor;
pub mod emergency;
pub mod fee;
pub mod grade;
pub mod icu_bed;
pub mod license;
pub mod medicine;
pub mod operator;
pub mod patient;
pub mod prescription;
pub mod school_class;
pub mod sequence;
pub mod site;
pub mod student;
pub mod teacher;
pub mod timetable;
pub mod uaf;
pub mod vital_sign;
