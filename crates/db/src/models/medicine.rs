//! Medicine stock and dose unit models.

use regsuite_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `medicines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Medicine {
    pub id: DbId,
    pub name: String,
    pub qty_available: f64,
    pub unit: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMedicine {
    pub name: String,
    pub qty_available: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMedicine {
    pub name: Option<String>,
    pub qty_available: Option<f64>,
    pub unit: Option<String>,
}

/// A row from the `dose_units` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DoseUnit {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDoseUnit {
    pub name: String,
    pub description: String,
}
