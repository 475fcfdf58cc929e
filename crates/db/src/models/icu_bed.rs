//! ICU bed model and DTOs.

use regsuite_core::hospital::bed::{self, BedStatus};
use regsuite_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `icu_beds` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IcuBed {
    pub id: DbId,
    pub name: String,
    pub status: String,
    pub patient_id: Option<DbId>,
    pub assigned_date: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Bed with its derived availability flag.
#[derive(Debug, Clone, Serialize)]
pub struct IcuBedView {
    #[serde(flatten)]
    pub bed: IcuBed,
    pub is_available: bool,
}

impl From<IcuBed> for IcuBedView {
    fn from(bed: IcuBed) -> Self {
        let is_available = bed
            .status
            .parse::<BedStatus>()
            .map(bed::is_available)
            .unwrap_or(false);
        Self { bed, is_available }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateIcuBed {
    pub name: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateIcuBed {
    pub name: Option<String>,
    pub notes: Option<String>,
}

/// Body of the assign action.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignBed {
    pub patient_id: DbId,
}
