//! Student enrolment rules.

use crate::error::CoreError;

define_states! {
    /// Enrolment status of a student.
    StudentStatus("student") {
        Active = "active",
        Inactive = "inactive",
        Graduated = "graduated",
        Transferred = "transferred",
    }
    transitions {
        Active => [Inactive, Graduated, Transferred],
        Inactive => [Active],
        Graduated => [],
        Transferred => [],
    }
}

/// Roll number handed out on registration: one past the highest in the class,
/// starting at 1 (also for students registered without a class).
pub fn next_roll_number(current_max: Option<i32>) -> i32 {
    current_max.unwrap_or(0).max(0) + 1
}

pub fn validate_roll_number(roll_number: i32) -> Result<(), CoreError> {
    if roll_number < 0 {
        return Err(CoreError::Validation(format!(
            "Roll number cannot be negative (got {roll_number})"
        )));
    }
    Ok(())
}

pub fn duplicate_roll_number_error(roll_number: i32) -> CoreError {
    CoreError::Conflict(format!(
        "Roll number {roll_number} must be unique within the same class"
    ))
}

/// Registration requires a current academic year to attach the student to.
pub fn missing_current_year_error() -> CoreError {
    CoreError::Validation(
        "No current academic year found. Please set up academic years first.".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::StateMachine;

    #[test]
    fn roll_numbers_continue_after_the_highest() {
        assert_eq!(next_roll_number(None), 1);
        assert_eq!(next_roll_number(Some(0)), 1);
        assert_eq!(next_roll_number(Some(27)), 28);
    }

    #[test]
    fn graduation_is_final() {
        assert!(StudentStatus::Graduated.is_terminal());
        assert!(StudentStatus::Graduated
            .transition(StudentStatus::Active)
            .is_err());
        assert!(StudentStatus::Inactive
            .transition(StudentStatus::Active)
            .is_ok());
    }

    #[test]
    fn negative_roll_number_is_rejected() {
        assert!(validate_roll_number(0).is_ok());
        assert!(validate_roll_number(-3).is_err());
    }
}
