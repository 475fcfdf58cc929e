//! License model and DTOs.

use regsuite_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `licenses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct License {
    pub id: DbId,
    pub operator_id: DbId,
    pub license_number: String,
    pub license_type: String,
    pub issue_date: Option<Date>,
    pub expiry_date: Option<Date>,
    pub fee_amount: f64,
    pub currency: String,
    pub status: String,
    pub conditions: Option<String>,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for issuing a license. `license_number` is assigned from the
/// `license.number` counter when missing or `"New"`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLicense {
    pub operator_id: DbId,
    pub license_number: Option<String>,
    pub license_type: String,
    pub issue_date: Option<Date>,
    pub expiry_date: Option<Date>,
    pub fee_amount: Option<f64>,
    pub currency: Option<String>,
    pub conditions: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLicense {
    pub license_type: Option<String>,
    pub issue_date: Option<Date>,
    pub expiry_date: Option<Date>,
    pub fee_amount: Option<f64>,
    pub currency: Option<String>,
    pub conditions: Option<String>,
}

/// Row of the expiring-licenses report.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExpiringLicense {
    pub id: DbId,
    pub license_number: String,
    pub license_type: String,
    pub operator_id: DbId,
    pub operator_code: String,
    pub partner_name: Option<String>,
    pub expiry_date: Date,
}

#[derive(Debug, Deserialize)]
pub struct LicenseListParams {
    pub operator_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
