//! Grade computation.

use crate::error::CoreError;

/// Default total marks of an exam.
pub const DEFAULT_TOTAL_MARKS: f64 = 100.0;

define_choice! {
    ExamType("exam type") {
        Quarterly = "quarterly",
        HalfYearly = "half_yearly",
        Final = "final",
        Assignment = "assignment",
        Project = "project",
    }
}

/// `marks / total * 100`, 0 when the total is not positive.
pub fn percentage(marks_obtained: f64, total_marks: f64) -> f64 {
    if total_marks > 0.0 {
        marks_obtained / total_marks * 100.0
    } else {
        0.0
    }
}

/// Letter grade for a percentage.
pub fn letter(percentage: f64) -> &'static str {
    match percentage {
        p if p >= 90.0 => "A+",
        p if p >= 80.0 => "A",
        p if p >= 70.0 => "B",
        p if p >= 60.0 => "C",
        p if p >= 50.0 => "D",
        _ => "F",
    }
}

pub fn validate_marks(marks_obtained: f64, total_marks: f64) -> Result<(), CoreError> {
    if marks_obtained < 0.0 {
        return Err(CoreError::Validation(format!(
            "Marks obtained cannot be negative (got {marks_obtained})"
        )));
    }
    if total_marks > 0.0 && marks_obtained > total_marks {
        return Err(CoreError::Validation(format!(
            "Marks obtained ({marks_obtained}) exceed total marks ({total_marks})"
        )));
    }
    Ok(())
}

/// Round to two decimals, as shown in class averages.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_handles_zero_total() {
        assert_eq!(percentage(45.0, 50.0), 90.0);
        assert_eq!(percentage(10.0, 0.0), 0.0);
        assert_eq!(percentage(10.0, -5.0), 0.0);
    }

    #[test]
    fn letter_boundaries_are_inclusive() {
        assert_eq!(letter(90.0), "A+");
        assert_eq!(letter(89.99), "A");
        assert_eq!(letter(80.0), "A");
        assert_eq!(letter(70.0), "B");
        assert_eq!(letter(60.0), "C");
        assert_eq!(letter(50.0), "D");
        assert_eq!(letter(49.9), "F");
        assert_eq!(letter(0.0), "F");
    }

    #[test]
    fn marks_cannot_exceed_total() {
        assert!(validate_marks(80.0, 100.0).is_ok());
        assert!(validate_marks(101.0, 100.0).is_err());
        assert!(validate_marks(-1.0, 100.0).is_err());
    }

    #[test]
    fn rounding_to_two_places() {
        assert_eq!(round2(72.456), 72.46);
        assert_eq!(round2(66.666_666), 66.67);
    }
}
