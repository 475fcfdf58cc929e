//! Appointment and medical record models.

use regsuite_core::hospital::appointment;
use regsuite_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `appointments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub reference: String,
    pub patient_id: DbId,
    pub doctor_id: DbId,
    pub appointment_date: Timestamp,
    /// Hours.
    pub duration: f64,
    pub reason: String,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
    pub state: String,
    pub priority: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Appointment with its computed end time.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub appointment_end: Timestamp,
}

impl From<Appointment> for AppointmentView {
    fn from(appointment: Appointment) -> Self {
        let appointment_end =
            appointment::appointment_end(appointment.appointment_date, appointment.duration);
        Self {
            appointment,
            appointment_end,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppointment {
    pub reference: Option<String>,
    pub patient_id: DbId,
    pub doctor_id: DbId,
    pub appointment_date: Timestamp,
    pub duration: Option<f64>,
    pub reason: String,
    pub symptoms: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAppointment {
    pub doctor_id: Option<DbId>,
    pub appointment_date: Option<Timestamp>,
    pub duration: Option<f64>,
    pub reason: Option<String>,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
    pub priority: Option<String>,
}

/// Body of the bulk-confirm action.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkConfirm {
    pub ids: Vec<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentListParams {
    pub patient_id: Option<DbId>,
    pub doctor_id: Option<DbId>,
    pub state: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Completed appointment due a follow-up, joined with patient and doctor.
#[derive(Debug, Clone, FromRow)]
pub struct FollowUpCandidate {
    pub appointment_id: DbId,
    pub appointment_date: Timestamp,
    pub patient_id: DbId,
    pub patient_name: String,
    pub doctor_login: Option<String>,
}

/// A row from the `medical_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MedicalRecord {
    pub id: DbId,
    pub patient_id: DbId,
    pub appointment_id: Option<DbId>,
    pub doctor_id: DbId,
    pub visit_date: Timestamp,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
