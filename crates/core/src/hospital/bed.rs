//! ICU bed guards.

use crate::error::CoreError;

define_states! {
    BedStatus("ICU bed") {
        Available = "available",
        Booked = "booked",
        Maintenance = "maintenance",
    }
    transitions {
        Available => [Booked, Maintenance],
        Booked => [Available],
        Maintenance => [Available],
    }
}

/// `is_available` is derived from the status, never stored independently.
pub fn is_available(status: BedStatus) -> bool {
    status == BedStatus::Available
}

/// Names must be non-empty and not purely numeric ("ICU Bed A1", not "12").
pub fn validate_bed_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c.is_numeric()) {
        return Err(CoreError::Validation(
            "Invalid ICU Bed name. Please use names like 'ICU Bed A1'.".to_string(),
        ));
    }
    Ok(())
}

pub fn duplicate_name_error(name: &str) -> CoreError {
    CoreError::Conflict(format!("ICU Bed with name '{name}' already exists."))
}

/// A booked bed cannot be deleted.
pub fn ensure_deletable(status: BedStatus) -> Result<(), CoreError> {
    if status == BedStatus::Booked {
        return Err(CoreError::Conflict(
            "You cannot delete a bed that is marked as 'Booked'.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::StateMachine;

    #[test]
    fn numeric_or_blank_names_are_rejected() {
        assert!(validate_bed_name("ICU Bed A1").is_ok());
        assert!(validate_bed_name("12").is_err());
        assert!(validate_bed_name("").is_err());
        assert!(validate_bed_name("   ").is_err());
    }

    #[test]
    fn booked_bed_cannot_be_deleted() {
        let err = ensure_deletable(BedStatus::Booked).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Conflict: You cannot delete a bed that is marked as 'Booked'."
        );
        assert!(ensure_deletable(BedStatus::Available).is_ok());
        assert!(ensure_deletable(BedStatus::Maintenance).is_ok());
    }

    #[test]
    fn availability_follows_status() {
        assert!(is_available(BedStatus::Available));
        assert!(!is_available(BedStatus::Booked));
        assert!(!is_available(BedStatus::Maintenance));
    }

    #[test]
    fn bed_under_maintenance_cannot_be_booked() {
        assert!(BedStatus::Maintenance.transition(BedStatus::Booked).is_err());
        assert!(BedStatus::Available.transition(BedStatus::Booked).is_ok());
    }
}
