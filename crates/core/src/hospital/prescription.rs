//! Prescription confirmation and dispensing rules.

use crate::error::CoreError;

define_states! {
    PrescriptionState("prescription") {
        Draft = "draft",
        Confirmed = "confirmed",
        Dispensed = "dispensed",
        Cancelled = "cancelled",
    }
    transitions {
        Draft => [Confirmed, Cancelled],
        Confirmed => [Dispensed, Cancelled],
        Dispensed => [],
        Cancelled => [],
    }
}

/// One prescription line joined with its medicine's stock level.
#[derive(Debug, Clone, PartialEq)]
pub struct StockLine {
    pub medicine_name: String,
    pub available: f64,
    pub required: f64,
}

/// Every line must be coverable from current stock. The first shortfall is
/// reported.
pub fn check_stock(lines: &[StockLine]) -> Result<(), CoreError> {
    for line in lines {
        if line.available < line.required {
            return Err(CoreError::Conflict(format!(
                "Insufficient stock for {}. Available: {}, Required: {}",
                line.medicine_name, line.available, line.required
            )));
        }
    }
    Ok(())
}

/// A prescription cannot be confirmed without at least one line.
pub fn ensure_has_lines(line_count: usize) -> Result<(), CoreError> {
    if line_count == 0 {
        return Err(CoreError::Validation(
            "A prescription needs at least one medicine line".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_quantity(quantity: f64) -> Result<(), CoreError> {
    if !(quantity > 0.0) {
        return Err(CoreError::Validation(format!(
            "Quantity must be greater than 0 (got {quantity})"
        )));
    }
    Ok(())
}

/// Stock on hand may be zero but never negative.
pub fn validate_stock_level(quantity: f64) -> Result<(), CoreError> {
    if !(quantity >= 0.0) {
        return Err(CoreError::Validation(format!(
            "Available quantity cannot be negative (got {quantity})"
        )));
    }
    Ok(())
}
