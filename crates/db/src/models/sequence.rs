//! Named counter rows.

use regsuite_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sequences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sequence {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub prefix: String,
    pub padding: i32,
    pub number_next: i64,
    pub number_increment: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adjusting a counter's presentation or step.
///
/// `number_next` is deliberately absent: counters never move backwards.
#[derive(Debug, Deserialize)]
pub struct UpdateSequence {
    pub name: Option<String>,
    pub prefix: Option<String>,
    pub padding: Option<i32>,
    pub number_increment: Option<i64>,
}
