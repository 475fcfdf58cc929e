//! Classes, teachers, academic years and promotion.

use crate::error::CoreError;
use crate::types::Date;

/// Seats in a class unless configured otherwise.
pub const DEFAULT_CAPACITY: i32 = 30;

define_choice! {
    TeacherStatus("teacher status") {
        Active = "active",
        Inactive = "inactive",
        OnLeave = "on_leave",
    }
}

define_choice! {
    /// Highest qualification held by a teacher.
    Qualification("qualification") {
        Bachelor = "bachelor",
        Master = "master",
        Phd = "phd",
        Other = "other",
    }
}

/// Next class code for promotion: the digits are incremented and placed
/// before the letters (`"1A"` → `"2A"`). A code without digits, or whose
/// number cannot be incremented, is returned unchanged.
pub fn increment_class_code(code: &str) -> String {
    let digits: String = code.chars().filter(|c| c.is_ascii_digit()).collect();
    let letters: String = code.chars().filter(|c| c.is_alphabetic()).collect();
    match digits.parse::<u64>().ok().and_then(|n| n.checked_add(1)) {
        Some(next) => format!("{next}{letters}"),
        None => code.to_string(),
    }
}

pub fn validate_capacity(capacity: i32) -> Result<(), CoreError> {
    if capacity < 1 {
        return Err(CoreError::Validation(format!(
            "Class capacity must be at least 1 (got {capacity})"
        )));
    }
    Ok(())
}

/// Registration into a full class is rejected.
pub fn ensure_seat_available(current_students: i64, capacity: i32) -> Result<(), CoreError> {
    if current_students >= i64::from(capacity) {
        return Err(CoreError::Conflict(format!(
            "Class is full ({current_students} of {capacity} seats taken)"
        )));
    }
    Ok(())
}

/// Academic year bounds: start strictly before end.
pub fn validate_academic_year(start: Date, end: Date) -> Result<(), CoreError> {
    if start >= end {
        return Err(CoreError::Validation(format!(
            "Academic year start {start} must be before end {end}"
        )));
    }
    Ok(())
}

/// Promotion runs once the current year has ended and not before.
pub fn promotion_due(year_end: Date, already_promoted: bool, today: Date) -> bool {
    !already_promoted && today >= year_end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn class_code_increments_numeric_part() {
        assert_eq!(increment_class_code("1A"), "2A");
        assert_eq!(increment_class_code("9B"), "10B");
        assert_eq!(increment_class_code("10"), "11");
    }

    #[test]
    fn class_code_without_digits_is_unchanged() {
        assert_eq!(increment_class_code("KG"), "KG");
        assert_eq!(increment_class_code(""), "");
    }

    #[test]
    fn class_code_at_the_numeric_limit_is_unchanged() {
        assert_eq!(
            increment_class_code("18446744073709551615A"),
            "18446744073709551615A"
        );
        assert_eq!(
            increment_class_code("18446744073709551614A"),
            "18446744073709551615A"
        );
        assert_eq!(increment_class_code("99999999999999999999B"), "99999999999999999999B");
    }

    #[test]
    fn full_class_rejects_registration() {
        assert!(ensure_seat_available(29, 30).is_ok());
        assert!(ensure_seat_available(30, 30).is_err());
        assert!(validate_capacity(0).is_err());
    }

    #[test]
    fn promotion_waits_for_year_end_and_runs_once() {
        let end = d(2026, 3, 31);
        assert!(!promotion_due(end, false, d(2026, 3, 30)));
        assert!(promotion_due(end, false, d(2026, 3, 31)));
        assert!(!promotion_due(end, true, d(2026, 4, 2)));
    }

    #[test]
    fn academic_year_must_have_positive_length() {
        assert!(validate_academic_year(d(2025, 4, 1), d(2026, 3, 31)).is_ok());
        assert!(validate_academic_year(d(2026, 3, 31), d(2026, 3, 31)).is_err());
    }
}
