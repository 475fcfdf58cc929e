//! Emergency case model and DTOs.

use regsuite_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `emergency_cases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmergencyCase {
    pub id: DbId,
    pub reference: String,
    pub patient_id: DbId,
    pub triage_level: String,
    pub chief_complaint: String,
    pub vital_signs: Option<String>,
    pub initial_assessment: Option<String>,
    pub treatment_given: Option<String>,
    pub assigned_doctor_id: Option<DbId>,
    pub nurse_name: Option<String>,
    pub arrival_time: Timestamp,
    pub treatment_start_time: Option<Timestamp>,
    pub discharge_time: Option<Timestamp>,
    pub state: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmergencyCase {
    pub reference: Option<String>,
    pub patient_id: DbId,
    pub triage_level: String,
    pub chief_complaint: String,
    pub vital_signs: Option<String>,
    pub initial_assessment: Option<String>,
    pub assigned_doctor_id: Option<DbId>,
    pub nurse_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmergencyCase {
    pub triage_level: Option<String>,
    pub vital_signs: Option<String>,
    pub initial_assessment: Option<String>,
    pub treatment_given: Option<String>,
    pub assigned_doctor_id: Option<DbId>,
    pub nurse_name: Option<String>,
}

/// Body of the emergency state actions.
#[derive(Debug, Clone, Deserialize)]
pub struct EmergencyTransition {
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct EmergencyListParams {
    pub state: Option<String>,
    pub triage_level: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
