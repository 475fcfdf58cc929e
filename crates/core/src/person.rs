//! Attributes shared by every person-like record (patients, students,
//! teachers, operator contacts).

use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum length of a contact (phone) number.
pub const MAX_CONTACT_LENGTH: usize = 10;

/// Maximum length of a name field.
pub const MAX_NAME_LENGTH: usize = 200;

define_choice! {
    /// Recorded gender.
    Gender("gender") {
        Male = "male",
        Female = "female",
        Other = "other",
    }
}

define_choice! {
    /// ABO/Rh blood group.
    BloodGroup("blood group") {
        APositive = "a+",
        ANegative = "a-",
        BPositive = "b+",
        BNegative = "b-",
        AbPositive = "ab+",
        AbNegative = "ab-",
        OPositive = "o+",
        ONegative = "o-",
    }
}

define_choice! {
    /// Marital status.
    MaritalStatus("marital status") {
        Single = "single",
        Married = "married",
        Divorced = "divorced",
        Widowed = "widowed",
    }
}

/// `"{first} {last}"`, trimmed, as used for students and teachers.
pub fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name.trim(), last_name.trim())
        .trim()
        .to_string()
}

/// A required name: non-blank and at most [`MAX_NAME_LENGTH`] characters.
pub fn validate_name(label: &str, name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!("{label} is required")));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{label} exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// A contact number: digits only, at most [`MAX_CONTACT_LENGTH`] of them.
pub fn validate_contact_number(number: &str) -> Result<(), CoreError> {
    if number.is_empty() {
        return Err(CoreError::Validation(
            "Contact number must not be empty".to_string(),
        ));
    }
    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "Invalid contact number '{number}'. Only digits are allowed"
        )));
    }
    if number.len() > MAX_CONTACT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Contact number '{number}' exceeds {MAX_CONTACT_LENGTH} digits"
        )));
    }
    Ok(())
}

/// An e-mail address, when one is given.
pub fn validate_optional_email(email: Option<&str>) -> Result<(), CoreError> {
    match email {
        Some(e) if !e.validate_email() => Err(CoreError::Validation(format!(
            "Invalid email address '{e}'"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_joins_and_trims() {
        assert_eq!(display_name(" Ada ", "Lovelace"), "Ada Lovelace");
        assert_eq!(display_name("Plato", ""), "Plato");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(validate_name("Name", "  ").is_err());
        assert!(validate_name("Name", "Grace").is_ok());
    }

    #[test]
    fn overlong_name_is_rejected() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name("Name", &long).is_err());
    }

    #[test]
    fn contact_number_must_be_short_digits() {
        assert!(validate_contact_number("9876543210").is_ok());
        assert!(validate_contact_number("98765432101").is_err());
        assert!(validate_contact_number("98-765").is_err());
        assert!(validate_contact_number("").is_err());
    }

    #[test]
    fn email_is_checked_only_when_present() {
        assert!(validate_optional_email(None).is_ok());
        assert!(validate_optional_email(Some("nurse@example.org")).is_ok());
        assert!(validate_optional_email(Some("not-an-email")).is_err());
    }

    #[test]
    fn blood_group_uses_clinical_notation() {
        assert_eq!(BloodGroup::AbNegative.as_str(), "ab-");
        assert_eq!("o+".parse::<BloodGroup>().unwrap(), BloodGroup::OPositive);
    }
}
