//! Attendance rules.

use chrono::{Datelike, Duration};

use crate::types::Date;

/// Students below this weekly presence percentage are reported.
pub const LOW_ATTENDANCE_THRESHOLD: f64 = 75.0;

define_choice! {
    AttendanceStatus("attendance status") {
        Present = "present",
        Absent = "absent",
        Late = "late",
        Excused = "excused",
    }
}

impl AttendanceStatus {
    /// Status given to generated records before a teacher marks them.
    pub const GENERATED_DEFAULT: AttendanceStatus = AttendanceStatus::Absent;

    /// Status used by the bulk "mark present" action.
    pub const BULK_MARK: AttendanceStatus = AttendanceStatus::Present;
}

/// Monday..Sunday of the week before `today`'s week.
pub fn previous_week(today: Date) -> (Date, Date) {
    let start = today - Duration::days(i64::from(today.weekday().num_days_from_monday()) + 7);
    (start, start + Duration::days(6))
}

/// Present days as a percentage of recorded days; `None` with no records.
pub fn attendance_percentage(present_days: i64, total_days: i64) -> Option<f64> {
    if total_days <= 0 {
        return None;
    }
    Some(present_days as f64 / total_days as f64 * 100.0)
}

/// Whether the week's record should be reported. Students without any record
/// for the week are not reported.
pub fn is_low_attendance(present_days: i64, total_days: i64) -> bool {
    attendance_percentage(present_days, total_days)
        .is_some_and(|p| p < LOW_ATTENDANCE_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn previous_week_runs_monday_to_sunday() {
        // 2026-10-14 is a Wednesday.
        assert_eq!(previous_week(d(2026, 10, 14)), (d(2026, 10, 5), d(2026, 10, 11)));
        // On a Monday the previous full week is still returned.
        assert_eq!(previous_week(d(2026, 10, 12)), (d(2026, 10, 5), d(2026, 10, 11)));
    }

    #[test]
    fn percentage_requires_records() {
        assert_eq!(attendance_percentage(3, 4), Some(75.0));
        assert_eq!(attendance_percentage(0, 0), None);
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!is_low_attendance(3, 4));
        assert!(is_low_attendance(2, 4));
        assert!(!is_low_attendance(0, 0));
    }

    #[test]
    fn defaults_for_generated_and_bulk_records() {
        assert_eq!(AttendanceStatus::GENERATED_DEFAULT.as_str(), "absent");
        assert_eq!(AttendanceStatus::BULK_MARK.as_str(), "present");
    }
}
