//! Hospital (HMIS) rules: patients, appointments, prescriptions, emergency
//! cases, ICU beds, vital signs and the reporting aggregates.

pub mod appointment;
pub mod bed;
pub mod emergency;
pub mod patient;
pub mod prescription;
pub mod reporting;
pub mod vitals;
