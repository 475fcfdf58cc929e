//! Prescription and prescription line models.

use regsuite_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `prescriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Prescription {
    pub id: DbId,
    pub reference: String,
    pub patient_id: DbId,
    pub doctor_id: DbId,
    pub appointment_id: Option<DbId>,
    pub prescription_date: Timestamp,
    pub state: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `prescription_lines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PrescriptionLine {
    pub id: DbId,
    pub prescription_id: DbId,
    pub medicine_id: DbId,
    pub quantity: f64,
    pub dosage: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Prescription with its lines.
#[derive(Debug, Clone, Serialize)]
pub struct PrescriptionWithLines {
    #[serde(flatten)]
    pub prescription: Prescription,
    pub lines: Vec<PrescriptionLine>,
}

/// A line joined with its medicine's current stock.
#[derive(Debug, Clone, FromRow)]
pub struct LineStock {
    pub medicine_id: DbId,
    pub medicine_name: String,
    pub qty_available: f64,
    pub quantity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePrescriptionLine {
    pub medicine_id: DbId,
    pub quantity: f64,
    pub dosage: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePrescription {
    pub reference: Option<String>,
    pub patient_id: DbId,
    pub doctor_id: DbId,
    pub appointment_id: Option<DbId>,
    pub notes: Option<String>,
    #[serde(default)]
    pub lines: Vec<CreatePrescriptionLine>,
}

#[derive(Debug, Deserialize)]
pub struct PrescriptionListParams {
    pub patient_id: Option<DbId>,
    pub state: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
