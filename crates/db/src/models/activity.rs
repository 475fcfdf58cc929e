//! Activity rows (to-dos, reminders and notes attached to a record).

use regsuite_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub entity_type: String,
    pub entity_id: DbId,
    pub activity_type: String,
    pub summary: String,
    pub note: Option<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<Date>,
    pub dedupe_key: Option<String>,
    pub done: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an activity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivity {
    pub entity_type: String,
    pub entity_id: DbId,
    pub activity_type: String,
    pub summary: String,
    pub note: Option<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<Date>,
    /// Jobs set this so a rerun over the same period is a no-op.
    #[serde(skip)]
    pub dedupe_key: Option<String>,
}

/// Query parameters for listing activities.
#[derive(Debug, Deserialize)]
pub struct ActivityListParams {
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub open_only: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
