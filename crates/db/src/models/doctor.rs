//! Doctor model and DTOs.

use regsuite_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `doctors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Doctor {
    pub id: DbId,
    pub name: String,
    pub department: Option<String>,
    /// Login that activities for this doctor are assigned to.
    pub user_login: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDoctor {
    pub name: String,
    pub department: Option<String>,
    pub user_login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDoctor {
    pub name: Option<String>,
    pub department: Option<String>,
    pub user_login: Option<String>,
    pub active: Option<bool>,
}
