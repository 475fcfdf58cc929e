//! Operator profile model and DTOs.

use regsuite_core::operator;
use regsuite_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `operators` table, with its license count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Operator {
    pub id: DbId,
    pub partner_name: Option<String>,
    pub operator_code: String,
    pub operator_type: String,
    pub legal_name: Option<String>,
    pub trading_name: Option<String>,
    pub tin: Option<String>,
    pub registration_no: Option<String>,
    pub is_uaf_contributor: bool,
    pub uaf_rate: f64,
    pub status: String,
    pub created_by: Option<String>,
    /// Number of licenses held; computed by the query.
    pub license_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Operator {
    pub fn display_name(&self) -> String {
        operator::display_name(self.partner_name.as_deref(), &self.operator_code)
    }
}

/// Operator as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct OperatorView {
    #[serde(flatten)]
    pub operator: Operator,
    pub display_name: String,
}

impl From<Operator> for OperatorView {
    fn from(operator: Operator) -> Self {
        let display_name = operator.display_name();
        Self {
            operator,
            display_name,
        }
    }
}

/// DTO for registering an operator. `operator_code` is assigned from the
/// `operator.code` counter when missing or `"New"`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOperator {
    pub partner_name: Option<String>,
    pub operator_code: Option<String>,
    pub operator_type: String,
    pub legal_name: Option<String>,
    pub trading_name: Option<String>,
    pub tin: Option<String>,
    pub registration_no: Option<String>,
    pub is_uaf_contributor: Option<bool>,
    pub uaf_rate: Option<f64>,
}

/// DTO for updating an operator. Status changes go through the actions.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOperator {
    pub partner_name: Option<String>,
    pub operator_type: Option<String>,
    pub legal_name: Option<String>,
    pub trading_name: Option<String>,
    pub tin: Option<String>,
    pub registration_no: Option<String>,
    pub is_uaf_contributor: Option<bool>,
    pub uaf_rate: Option<f64>,
}

/// Query parameters for listing operators.
#[derive(Debug, Deserialize)]
pub struct OperatorListParams {
    pub status: Option<String>,
    pub operator_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
