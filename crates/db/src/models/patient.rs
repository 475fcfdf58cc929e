//! Patient model and DTOs.

use regsuite_core::hospital::patient::PatientDerived;
use regsuite_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `patients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Patient {
    pub id: DbId,
    pub patient_id: String,
    pub name: String,
    pub date_of_birth: Option<Date>,
    pub registration_date: Timestamp,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub marital_status: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub insurance_id: Option<String>,
    pub insurance_provider: Option<String>,
    pub case_description: Option<String>,
    pub state: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Patient with its derived fields, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PatientView {
    #[serde(flatten)]
    pub patient: Patient,
    #[serde(flatten)]
    pub derived: PatientDerived,
}

impl PatientView {
    pub fn new(patient: Patient, today: Date) -> Self {
        let derived =
            PatientDerived::compute(patient.date_of_birth, patient.registration_date, today);
        Self { patient, derived }
    }
}

/// DTO for registering a patient. `patient_id` is assigned from the
/// `hospital.patient` counter when missing or `"New"`; `registration_date`
/// defaults to now.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatient {
    pub patient_id: Option<String>,
    pub name: String,
    pub date_of_birth: Option<Date>,
    pub registration_date: Option<Timestamp>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub marital_status: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub insurance_id: Option<String>,
    pub insurance_provider: Option<String>,
    pub case_description: Option<String>,
}

/// DTO for updating a patient. Identifier and state are not editable here.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePatient {
    pub name: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub marital_status: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub insurance_id: Option<String>,
    pub insurance_provider: Option<String>,
    pub case_description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PatientListParams {
    pub state: Option<String>,
    pub status: Option<String>,
    /// Case-insensitive match on name, patient ID or contact number.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
