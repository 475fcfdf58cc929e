//! Fee type and student fee models.

use regsuite_core::school::fee;
use regsuite_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `fee_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeeType {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub amount: f64,
    pub description: Option<String>,
    pub is_recurring: bool,
    pub recurrence: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeeType {
    pub name: String,
    pub code: String,
    pub amount: f64,
    pub description: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurrence: Option<String>,
}

/// A row from the `fees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fee {
    pub id: DbId,
    pub reference: String,
    pub student_id: DbId,
    pub academic_year_id: DbId,
    pub fee_type_id: DbId,
    pub amount: f64,
    pub due_date: Date,
    pub payment_date: Option<Date>,
    pub paid_amount: f64,
    pub state: String,
    pub payment_method: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeeView {
    #[serde(flatten)]
    pub fee: Fee,
    pub balance: f64,
}

impl From<Fee> for FeeView {
    fn from(f: Fee) -> Self {
        let balance = fee::balance(f.amount, f.paid_amount);
        Self { fee: f, balance }
    }
}

/// DTO for raising a fee. The amount defaults to the fee type's amount.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFee {
    pub reference: Option<String>,
    pub student_id: DbId,
    pub academic_year_id: Option<DbId>,
    pub fee_type_id: DbId,
    pub amount: Option<f64>,
    pub due_date: Date,
}

/// Body of the record-payment action.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPayment {
    pub amount: f64,
    pub payment_method: String,
    pub payment_date: Option<Date>,
}

/// Overdue fee joined with the student it belongs to.
#[derive(Debug, Clone, FromRow)]
pub struct OverdueFee {
    pub id: DbId,
    pub reference: String,
    pub student_id: DbId,
    pub student_name: String,
    pub amount: f64,
    pub paid_amount: f64,
    pub due_date: Date,
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct FeeListParams {
    pub student_id: Option<DbId>,
    pub state: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
