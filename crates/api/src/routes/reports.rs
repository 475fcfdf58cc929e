//! Route definitions for the read-only reports.

use axum::routing::get;
use axum::Router;

use crate::handlers::{hospital_reports, school_reports};
use crate::state::AppState;

/// Routes mounted at `/hospital/reports`.
///
/// ```text
/// GET    /daily-census         -> daily_census (?date=)
/// GET    /doctor-performance   -> doctor_performance (?date_from=&date_to=)
/// GET    /monthly              -> monthly_stats (?month=YYYY-MM)
/// ```
pub fn hospital_router() -> Router<AppState> {
    Router::new()
        .route("/daily-census", get(hospital_reports::daily_census))
        .route("/doctor-performance", get(hospital_reports::doctor_performance))
        .route("/monthly", get(hospital_reports::monthly_stats))
}

/// Routes mounted at `/school/reports`.
///
/// ```text
/// GET    /daily                -> daily_report (?date=)
/// GET    /class-performance    -> class_performance (?exam_type=&academic_year_id=)
/// ```
pub fn school_router() -> Router<AppState> {
    Router::new()
        .route("/daily", get(school_reports::daily_report))
        .route("/class-performance", get(school_reports::class_performance))
}
