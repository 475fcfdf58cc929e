//! Read-only hospital reports.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Months, Utc};
use regsuite_core::acl::{entity, Operation};
use regsuite_core::error::CoreError;
use regsuite_core::hospital::reporting::previous_month_range;
use regsuite_core::types::Date;
use regsuite_db::repositories::HospitalReportRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DayParams {
    pub date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct RangeParams {
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct MonthParams {
    /// `YYYY-MM`; defaults to the previous month.
    pub month: Option<String>,
}

/// GET /api/v1/hospital/reports/daily-census
pub async fn daily_census(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<DayParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::REPORT, Operation::Read)?;
    let day = params.date.unwrap_or_else(|| Utc::now().date_naive());
    let census = HospitalReportRepo::daily_census(&state.pool, day).await?;

    Ok(Json(DataResponse { data: census }))
}

/// GET /api/v1/hospital/reports/doctor-performance
///
/// Defaults to the last 30 days.
pub async fn doctor_performance(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::REPORT, Operation::Read)?;
    let to = params.date_to.unwrap_or_else(|| Utc::now().date_naive());
    let from = params.date_from.unwrap_or(to - Duration::days(30));
    if from > to {
        return Err(CoreError::Validation(format!(
            "date_from ({from}) must not be after date_to ({to})"
        ))
        .into());
    }

    let rows = HospitalReportRepo::doctor_performance(&state.pool, from, to).await?;

    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/hospital/reports/monthly
pub async fn monthly_stats(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::REPORT, Operation::Read)?;
    let (first, last) = match params.month.as_deref() {
        Some(month) => month_range(month)?,
        None => previous_month_range(Utc::now().date_naive()),
    };

    let stats = HospitalReportRepo::monthly_stats(&state.pool, first, last).await?;

    Ok(Json(DataResponse { data: stats }))
}

/// First and last day of a `YYYY-MM` month.
fn month_range(month: &str) -> Result<(Date, Date), CoreError> {
    let invalid = || CoreError::Validation(format!("Invalid month '{month}', expected YYYY-MM"));
    let first = Date::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").map_err(|_| invalid())?;
    let next = first.checked_add_months(Months::new(1)).ok_or_else(invalid)?;
    Ok((first, next - Duration::days(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_range_covers_whole_month() {
        let (first, last) = month_range("2024-02").unwrap();
        assert_eq!(first, Date::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last, Date::from_ymd_opt(2024, 2, 29).unwrap());

        let (_, last) = month_range("2025-12").unwrap();
        assert_eq!(last, Date::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn malformed_month_is_rejected() {
        assert!(month_range("2025-13").is_err());
        assert!(month_range("March").is_err());
    }
}
