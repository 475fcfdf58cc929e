//! Aggregates behind the hospital reports and the monthly statistics job.

use chrono::{Datelike, Duration};
use serde::Serialize;

use crate::types::Date;

/// Snapshot of the current day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCensus {
    pub report_date: Date,
    pub total_patients: i64,
    /// Today's appointments that are confirmed or in consultation.
    pub active_appointments: i64,
    pub emergency_cases: i64,
    pub new_prescriptions: i64,
}

/// Per-doctor appointment outcome over a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorPerformance {
    pub doctor_id: i64,
    pub doctor_name: String,
    pub department: String,
    pub total_appointments: i64,
    pub completed_appointments: i64,
    /// Percentage of appointments completed, 0 when there were none.
    pub completion_rate: f64,
    /// Mean duration (hours) of completed appointments, 0 when none.
    pub average_duration: f64,
}

impl DoctorPerformance {
    pub fn from_counts(
        doctor_id: i64,
        doctor_name: String,
        department: Option<String>,
        total: i64,
        completed: i64,
        completed_duration_sum: f64,
    ) -> Self {
        let completion_rate = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let average_duration = if completed > 0 {
            completed_duration_sum / completed as f64
        } else {
            0.0
        };
        Self {
            doctor_id,
            doctor_name,
            department: department.unwrap_or_else(|| "N/A".to_string()),
            total_appointments: total,
            completed_appointments: completed,
            completion_rate,
            average_duration,
        }
    }
}

/// Hospital statistics for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyStats {
    /// e.g. `"March 2026"`.
    pub period: String,
    pub total_patients: i64,
    pub new_patients: i64,
    pub total_appointments: i64,
    pub completed_appointments: i64,
}

impl MonthlyStats {
    /// Multi-line note body for the report activity.
    pub fn summary_note(&self) -> String {
        format!(
            "Monthly Hospital Statistics:\n\
             - Total Patients: {}\n\
             - New Patients: {}\n\
             - Total Appointments: {}\n\
             - Completed Appointments: {}",
            self.total_patients,
            self.new_patients,
            self.total_appointments,
            self.completed_appointments
        )
    }
}

/// First and last day of the month before `today`'s month.
pub fn previous_month_range(today: Date) -> (Date, Date) {
    let first_of_this_month = today.with_day(1).unwrap_or(today);
    let last = first_of_this_month - Duration::days(1);
    let first = last.with_day(1).unwrap_or(last);
    (first, last)
}

/// Display label of a month (`"%B %Y"`).
pub fn month_label(first_day: Date) -> String {
    first_day.format("%B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn previous_month_of_march_is_february() {
        assert_eq!(previous_month_range(d(2024, 3, 15)), (d(2024, 2, 1), d(2024, 2, 29)));
    }

    #[test]
    fn previous_month_of_january_is_last_december() {
        assert_eq!(previous_month_range(d(2026, 1, 1)), (d(2025, 12, 1), d(2025, 12, 31)));
    }

    #[test]
    fn month_label_is_long_form() {
        assert_eq!(month_label(d(2025, 12, 1)), "December 2025");
    }

    #[test]
    fn performance_rates() {
        let p = DoctorPerformance::from_counts(1, "Dr. Mehta".into(), None, 4, 3, 2.0);
        assert_eq!(p.completion_rate, 75.0);
        assert!((p.average_duration - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(p.department, "N/A");
    }

    #[test]
    fn performance_without_appointments_is_zero() {
        let p = DoctorPerformance::from_counts(2, "Dr. Lee".into(), Some("ICU".into()), 0, 0, 0.0);
        assert_eq!(p.completion_rate, 0.0);
        assert_eq!(p.average_duration, 0.0);
    }

    #[test]
    fn summary_note_lists_counts() {
        let stats = MonthlyStats {
            period: "May 2026".into(),
            total_patients: 120,
            new_patients: 14,
            total_appointments: 300,
            completed_appointments: 280,
        };
        let note = stats.summary_note();
        assert!(note.contains("- New Patients: 14"));
        assert!(note.contains("- Completed Appointments: 280"));
    }
}
