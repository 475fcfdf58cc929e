//! Operator / regulatory registry rules: operator profiles, licenses, sites
//! and universal-access-fund (UAF) declarations.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::Date;

/// Active licenses expiring within this many days get a reminder.
pub const EXPIRY_REMINDER_WINDOW_DAYS: i64 = 90;

/// ISO-4217 style currency code.
static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid regex"));

define_choice! {
    /// Kind of licensed operator.
    OperatorType("operator type") {
        Mno = "mno",
        Isp = "isp",
        Vsat = "vsat",
        Tv = "tv",
        Fm = "fm",
    }
}

define_states! {
    /// Regulatory standing of an operator.
    OperatorStatus("operator") {
        Pending = "pending",
        Active = "active",
        Suspended = "suspended",
        Revoked = "revoked",
    }
    transitions {
        Pending => [Active, Revoked],
        Active => [Suspended, Revoked],
        Suspended => [Active, Revoked],
        Revoked => [],
    }
}

define_choice! {
    LicenseType("license type") {
        Operator = "operator",
        Spectrum = "spectrum",
        Site = "site",
    }
}

define_states! {
    LicenseStatus("license") {
        Active = "active",
        Expired = "expired",
        Suspended = "suspended",
        Revoked = "revoked",
    }
    transitions {
        Active => [Expired, Suspended, Revoked],
        Suspended => [Active, Revoked],
        Expired => [],
        Revoked => [],
    }
}

define_choice! {
    SiteType("site type") {
        Tower = "tower",
        Exchange = "exchange",
        Datacenter = "datacenter",
        Hub = "hub",
    }
}

define_states! {
    /// Universal-access-fund declaration workflow.
    UafState("UAF declaration") {
        Draft = "draft",
        Verified = "verified",
        Invoiced = "invoiced",
        Paid = "paid",
    }
    transitions {
        Draft => [Verified],
        Verified => [Invoiced],
        Invoiced => [Paid],
        Paid => [],
    }
}

/// `"{partner or code} [{code}]"`, the operator's label in pickers.
pub fn display_name(partner_name: Option<&str>, operator_code: &str) -> String {
    let head = partner_name
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(operator_code);
    format!("{head} [{operator_code}]")
}

/// Whether an active license should get an expiry reminder on `today`.
///
/// Licenses that have already expired are still included while their status
/// says `active`, so the reminder keeps nagging until someone acts.
pub fn is_expiring_soon(
    status: LicenseStatus,
    expiry_date: Option<Date>,
    today: Date,
    window_days: i64,
) -> bool {
    match expiry_date {
        Some(expiry) if status == LicenseStatus::Active => {
            expiry < today + chrono::Duration::days(window_days)
        }
        _ => false,
    }
}

/// Days remaining until `expiry` (negative once expired).
pub fn days_until_expiry(expiry: Date, today: Date) -> i64 {
    (expiry - today).num_days()
}

/// Issue date must not be after expiry when both are set.
pub fn validate_license_dates(issue: Option<Date>, expiry: Option<Date>) -> Result<(), CoreError> {
    if let (Some(issue), Some(expiry)) = (issue, expiry) {
        if issue > expiry {
            return Err(CoreError::Validation(format!(
                "License issue date {issue} is after expiry date {expiry}"
            )));
        }
    }
    Ok(())
}

/// UAF contribution rate is a fraction in `[0, 1]`.
pub fn validate_uaf_rate(rate: f64) -> Result<(), CoreError> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(CoreError::Validation(format!(
            "UAF rate must be between 0 and 1 (got {rate})"
        )));
    }
    Ok(())
}

/// Latitude in `[-90, 90]`, longitude in `[-180, 180]`.
pub fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), CoreError> {
    if let Some(lat) = latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::Validation(format!(
                "Latitude must be between -90 and 90 (got {lat})"
            )));
        }
    }
    if let Some(lng) = longitude {
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoreError::Validation(format!(
                "Longitude must be between -180 and 180 (got {lng})"
            )));
        }
    }
    Ok(())
}

/// Declaration / invoicing period: start on or before end.
pub fn validate_period(start: Date, end: Date) -> Result<(), CoreError> {
    if start > end {
        return Err(CoreError::Validation(format!(
            "Period start {start} is after period end {end}"
        )));
    }
    Ok(())
}

pub fn validate_currency(code: &str) -> Result<(), CoreError> {
    if !CURRENCY_RE.is_match(code) {
        return Err(CoreError::Validation(format!(
            "Invalid currency code '{code}'. Use a three-letter code such as 'USD'"
        )));
    }
    Ok(())
}

/// Monetary amounts (fees, declarations, payments) may not be negative.
pub fn validate_amount(label: &str, amount: f64) -> Result<(), CoreError> {
    if amount < 0.0 || !amount.is_finite() {
        return Err(CoreError::Validation(format!(
            "{label} must be a non-negative amount (got {amount})"
        )));
    }
    Ok(())
}

/// Selection made in the "generate UAF invoices" wizard.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceWindow {
    pub date_from: Date,
    pub date_to: Date,
    /// Empty means every operator.
    pub operator_ids: Vec<crate::types::DbId>,
}

impl InvoiceWindow {
    pub fn new(
        date_from: Date,
        date_to: Date,
        operator_ids: Vec<crate::types::DbId>,
    ) -> Result<Self, CoreError> {
        validate_period(date_from, date_to)?;
        Ok(Self {
            date_from,
            date_to,
            operator_ids,
        })
    }

    /// A declaration is invoiced when its whole period lies in the window and
    /// its operator was selected (or none were).
    pub fn covers(&self, operator_id: crate::types::DbId, period_start: Date, period_end: Date) -> bool {
        period_start >= self.date_from
            && period_end <= self.date_to
            && (self.operator_ids.is_empty() || self.operator_ids.contains(&operator_id))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::lifecycle::StateMachine;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn display_name_prefers_partner() {
        assert_eq!(display_name(Some("Digicel"), "OP0001"), "Digicel [OP0001]");
        assert_eq!(display_name(None, "OP0002"), "OP0002 [OP0002]");
        assert_eq!(display_name(Some("  "), "OP0003"), "OP0003 [OP0003]");
    }

    #[test]
    fn revoked_operator_cannot_be_reactivated() {
        let err = OperatorStatus::Revoked
            .transition(OperatorStatus::Active)
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot move operator from 'revoked' to 'active'");
    }

    #[test]
    fn suspended_license_may_be_reinstated() {
        assert_eq!(
            LicenseStatus::Suspended.transition(LicenseStatus::Active).unwrap(),
            LicenseStatus::Active
        );
        assert!(LicenseStatus::Expired.is_terminal());
    }

    #[test]
    fn uaf_declaration_moves_strictly_forward() {
        assert!(UafState::Draft.transition(UafState::Verified).is_ok());
        assert_matches!(
            UafState::Draft.transition(UafState::Invoiced),
            Err(CoreError::InvalidTransition { from: "draft", to: "invoiced", .. })
        );
    }

    #[test]
    fn expiring_soon_window() {
        let today = d(2026, 1, 1);
        let soon = Some(d(2026, 3, 1));
        let far = Some(d(2026, 12, 1));
        assert!(is_expiring_soon(LicenseStatus::Active, soon, today, 90));
        assert!(!is_expiring_soon(LicenseStatus::Active, far, today, 90));
        assert!(!is_expiring_soon(LicenseStatus::Suspended, soon, today, 90));
        assert!(!is_expiring_soon(LicenseStatus::Active, None, today, 90));
        // Boundary is exclusive: exactly 90 days out is not yet "soon".
        assert!(!is_expiring_soon(LicenseStatus::Active, Some(d(2026, 4, 1)), today, 90));
        assert!(is_expiring_soon(LicenseStatus::Active, Some(d(2026, 3, 31)), today, 90));
    }

    #[test]
    fn days_until_expiry_goes_negative() {
        assert_eq!(days_until_expiry(d(2026, 1, 11), d(2026, 1, 1)), 10);
        assert_eq!(days_until_expiry(d(2025, 12, 31), d(2026, 1, 1)), -1);
    }

    #[test]
    fn license_issue_after_expiry_is_rejected() {
        assert!(validate_license_dates(Some(d(2026, 1, 1)), Some(d(2027, 1, 1))).is_ok());
        assert!(validate_license_dates(Some(d(2027, 1, 1)), Some(d(2026, 1, 1))).is_err());
        assert!(validate_license_dates(None, Some(d(2026, 1, 1))).is_ok());
    }

    #[test]
    fn uaf_rate_bounds() {
        assert!(validate_uaf_rate(0.0).is_ok());
        assert!(validate_uaf_rate(0.015).is_ok());
        assert!(validate_uaf_rate(1.0).is_ok());
        assert!(validate_uaf_rate(1.5).is_err());
        assert!(validate_uaf_rate(-0.1).is_err());
    }

    #[test]
    fn coordinates_bounds() {
        assert!(validate_coordinates(Some(-9.44), Some(147.18)).is_ok());
        assert!(validate_coordinates(Some(91.0), None).is_err());
        assert!(validate_coordinates(None, Some(-181.0)).is_err());
    }

    #[test]
    fn currency_code_shape() {
        assert!(validate_currency("PGK").is_ok());
        assert!(validate_currency("usd").is_err());
        assert!(validate_currency("EURO").is_err());
    }

    #[test]
    fn invoice_window_filters_period_and_operator() {
        let window = InvoiceWindow::new(d(2026, 1, 1), d(2026, 3, 31), vec![7]).unwrap();
        assert!(window.covers(7, d(2026, 1, 1), d(2026, 1, 31)));
        assert!(!window.covers(8, d(2026, 1, 1), d(2026, 1, 31)));
        assert!(!window.covers(7, d(2025, 12, 1), d(2026, 1, 31)));

        let all = InvoiceWindow::new(d(2026, 1, 1), d(2026, 3, 31), vec![]).unwrap();
        assert!(all.covers(99, d(2026, 2, 1), d(2026, 2, 28)));
    }

    #[test]
    fn inverted_invoice_window_is_rejected() {
        assert!(InvoiceWindow::new(d(2026, 3, 1), d(2026, 1, 1), vec![]).is_err());
    }
}
