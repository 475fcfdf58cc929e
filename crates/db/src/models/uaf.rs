//! Universal-access-fund declarations and payments.

use regsuite_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `uaf_declarations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UafDeclaration {
    pub id: DbId,
    pub operator_id: DbId,
    pub period_start: Date,
    pub period_end: Date,
    pub declared_amount: f64,
    pub currency: String,
    pub state: String,
    pub invoiced_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUafDeclaration {
    pub operator_id: DbId,
    pub period_start: Date,
    pub period_end: Date,
    pub declared_amount: Option<f64>,
    pub currency: Option<String>,
    pub notes: Option<String>,
}

/// Only draft declarations may be edited; the handler enforces this.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUafDeclaration {
    pub period_start: Option<Date>,
    pub period_end: Option<Date>,
    pub declared_amount: Option<f64>,
    pub currency: Option<String>,
    pub notes: Option<String>,
}

/// A row from the `uaf_payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UafPayment {
    pub id: DbId,
    pub declaration_id: DbId,
    pub amount: f64,
    pub currency: String,
    pub payment_date: Option<Date>,
    pub received_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUafPayment {
    pub amount: f64,
    pub currency: Option<String>,
    pub payment_date: Option<Date>,
}

/// Input of the "generate UAF invoices" wizard.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateInvoices {
    pub date_from: Date,
    pub date_to: Date,
    #[serde(default)]
    pub operator_ids: Vec<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct UafDeclarationListParams {
    pub operator_id: Option<DbId>,
    pub state: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
