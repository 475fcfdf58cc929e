//! Site / tower model and DTOs.

use regsuite_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Site {
    pub id: DbId,
    pub site_code: String,
    pub name: Option<String>,
    pub operator_id: Option<DbId>,
    pub site_type: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub installation_date: Option<Date>,
    pub co_location: bool,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSite {
    pub site_code: String,
    pub name: Option<String>,
    pub operator_id: Option<DbId>,
    pub site_type: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub installation_date: Option<Date>,
    pub co_location: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSite {
    pub name: Option<String>,
    pub operator_id: Option<DbId>,
    pub site_type: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub installation_date: Option<Date>,
    pub co_location: Option<bool>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct SiteListParams {
    pub operator_id: Option<DbId>,
    pub active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
