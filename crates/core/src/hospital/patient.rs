//! Patient registration rules.

use serde::Serialize;

use crate::age::{approximate_years, day_label, describe_age};
use crate::error::CoreError;
use crate::types::{Date, Timestamp};

define_states! {
    /// Admission state of a registered patient.
    PatientState("patient") {
        Draft = "draft",
        Admitted = "admitted",
        Discharged = "discharged",
    }
    transitions {
        Draft => [Admitted],
        Admitted => [Discharged],
        Discharged => [Admitted],
    }
}

define_choice! {
    /// Whether the patient is still followed up by the hospital.
    PatientStatus("patient status") {
        Active = "active",
        Inactive = "inactive",
        Deceased = "deceased",
    }
}

/// Rejection raised when a contact number is already registered.
pub fn duplicate_contact_error(contact_number: &str, existing_name: &str) -> CoreError {
    CoreError::Conflict(format!(
        "A patient with contact number {contact_number} already exists: {existing_name}."
    ))
}

/// Fields recomputed from stored attributes every time a patient is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientDerived {
    /// Calendar-aware age text.
    pub age: String,
    /// Whole years, elapsed days / 365.
    pub age_years: i32,
    pub registration_day_label: String,
}

impl PatientDerived {
    pub fn compute(date_of_birth: Option<Date>, registered_at: Timestamp, today: Date) -> Self {
        Self {
            age: describe_age(date_of_birth, today),
            age_years: approximate_years(date_of_birth, today),
            registration_day_label: day_label(registered_at.date_naive(), today),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::lifecycle::StateMachine;

    #[test]
    fn duplicate_contact_message_names_existing_patient() {
        let err = duplicate_contact_error("9876543210", "Asha Rao");
        assert_eq!(
            err.to_string(),
            "Conflict: A patient with contact number 9876543210 already exists: Asha Rao."
        );
    }

    #[test]
    fn discharged_patient_can_be_readmitted() {
        assert!(PatientState::Discharged
            .transition(PatientState::Admitted)
            .is_ok());
        assert!(PatientState::Draft
            .transition(PatientState::Discharged)
            .is_err());
    }

    #[test]
    fn derived_fields_use_both_age_rules() {
        let today = Date::from_ymd_opt(2024, 2, 26).unwrap();
        let dob = Date::from_ymd_opt(2000, 3, 1);
        let registered = Utc.with_ymd_and_hms(2024, 2, 25, 9, 30, 0).unwrap();

        let derived = PatientDerived::compute(dob, registered, today);
        assert_eq!(derived.age, "23 year(s), 11 month(s), 25 day(s) old");
        assert_eq!(derived.age_years, 24);
        assert_eq!(derived.registration_day_label, "Yesterday");
    }
}
