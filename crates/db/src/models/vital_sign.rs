//! Vital sign records.

use regsuite_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `vital_signs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VitalSign {
    pub id: DbId,
    pub patient_id: DbId,
    pub date: Date,
    pub temperature: Option<f64>,
    pub pulse: Option<i32>,
    pub respiration_rate: Option<i32>,
    pub blood_pressure: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVitalSign {
    pub patient_id: DbId,
    pub date: Option<Date>,
    pub temperature: Option<f64>,
    pub pulse: Option<i32>,
    pub respiration_rate: Option<i32>,
    pub blood_pressure: Option<String>,
}
