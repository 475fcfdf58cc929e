//! Named counters for human-readable identifiers.
//!
//! A counter hands out strictly increasing integers; the identifier is the
//! counter's prefix followed by the zero-padded number (`PAT0001`). The
//! increment itself is an atomic `UPDATE ... RETURNING` in the `db` crate;
//! this module owns the well-known counter definitions and the formatting.

use crate::error::CoreError;

/// Placeholder a client may send instead of an identifier ("assign one").
pub const NEW_PLACEHOLDER: &str = "New";

/// Largest zero padding accepted for a counter.
pub const MAX_PADDING: i32 = 12;

/// Static definition of a named counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceDef {
    /// Lookup key, e.g. `"hospital.patient"`.
    pub code: &'static str,
    /// Human label.
    pub name: &'static str,
    pub prefix: &'static str,
    pub padding: i32,
}

pub const PATIENT: SequenceDef = SequenceDef {
    code: "hospital.patient",
    name: "Patient ID",
    prefix: "PAT",
    padding: 4,
};

pub const APPOINTMENT: SequenceDef = SequenceDef {
    code: "hospital.appointment",
    name: "Appointment Reference",
    prefix: "APT",
    padding: 5,
};

pub const PRESCRIPTION: SequenceDef = SequenceDef {
    code: "hospital.prescription",
    name: "Prescription ID",
    prefix: "RX",
    padding: 5,
};

pub const EMERGENCY: SequenceDef = SequenceDef {
    code: "hospital.emergency",
    name: "Emergency Case ID",
    prefix: "ER",
    padding: 5,
};

pub const STUDENT: SequenceDef = SequenceDef {
    code: "school.student",
    name: "Student ID",
    prefix: "STU",
    padding: 5,
};

pub const TEACHER: SequenceDef = SequenceDef {
    code: "school.teacher",
    name: "Teacher ID",
    prefix: "TCH",
    padding: 4,
};

pub const FEE: SequenceDef = SequenceDef {
    code: "school.fee",
    name: "Fee Reference",
    prefix: "FEE",
    padding: 5,
};

pub const OPERATOR: SequenceDef = SequenceDef {
    code: "operator.code",
    name: "Operator Code",
    prefix: "OP",
    padding: 4,
};

pub const LICENSE: SequenceDef = SequenceDef {
    code: "license.number",
    name: "License Number",
    prefix: "LIC",
    padding: 5,
};

/// Every counter the registries use. Seeded by the migrations and re-created
/// on first use if a row has gone missing.
pub const ALL: &[SequenceDef] = &[
    PATIENT,
    APPOINTMENT,
    PRESCRIPTION,
    EMERGENCY,
    STUDENT,
    TEACHER,
    FEE,
    OPERATOR,
    LICENSE,
];

/// Look up a well-known counter by code.
pub fn definition_for(code: &str) -> Option<&'static SequenceDef> {
    ALL.iter().find(|s| s.code == code)
}

/// Format `number` as `prefix` + `number` left-padded with zeros to `padding`
/// digits. Numbers wider than the padding are printed in full.
pub fn format_sequence(prefix: &str, padding: i32, number: i64) -> String {
    let width = padding.clamp(0, MAX_PADDING) as usize;
    format!("{prefix}{number:0>width$}")
}

/// Whether a client-supplied identifier asks for one to be assigned.
///
/// Missing, blank and the `"New"` placeholder all mean "assign"; anything
/// else is kept as given.
pub fn needs_assignment(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => true,
        Some(v) => v.is_empty() || v == NEW_PLACEHOLDER,
    }
}

/// Validate a counter definition supplied by an administrator.
pub fn validate_definition(prefix: &str, padding: i32, increment: i64) -> Result<(), CoreError> {
    if prefix.len() > 16 {
        return Err(CoreError::Validation(format!(
            "Sequence prefix '{prefix}' exceeds 16 characters"
        )));
    }
    if !(0..=MAX_PADDING).contains(&padding) {
        return Err(CoreError::Validation(format!(
            "Sequence padding must be between 0 and {MAX_PADDING} (got {padding})"
        )));
    }
    if increment < 1 {
        return Err(CoreError::Validation(format!(
            "Sequence increment must be at least 1 (got {increment})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_configured_width() {
        assert_eq!(format_sequence("PAT", 4, 1), "PAT0001");
        assert_eq!(format_sequence("APT", 5, 42), "APT00042");
    }

    #[test]
    fn wider_numbers_are_not_truncated() {
        assert_eq!(format_sequence("PAT", 4, 123_456), "PAT123456");
    }

    #[test]
    fn zero_padding_prints_bare_number() {
        assert_eq!(format_sequence("X-", 0, 7), "X-7");
    }

    #[test]
    fn padded_identifiers_sort_in_issue_order() {
        let ids: Vec<String> = (1..=200).map(|n| format_sequence("RX", 5, n)).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn placeholder_and_blank_request_assignment() {
        assert!(needs_assignment(None));
        assert!(needs_assignment(Some("")));
        assert!(needs_assignment(Some("  ")));
        assert!(needs_assignment(Some("New")));
        assert!(!needs_assignment(Some("PAT0099")));
    }

    #[test]
    fn well_known_codes_are_unique() {
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert_ne!(a.code, b.code);
            }
        }
    }

    #[test]
    fn definition_lookup_by_code() {
        assert_eq!(definition_for("hospital.patient"), Some(&PATIENT));
        assert!(definition_for("unknown.counter").is_none());
    }

    #[test]
    fn definition_bounds_are_enforced() {
        assert!(validate_definition("PAT", 4, 1).is_ok());
        assert!(validate_definition("PAT", -1, 1).is_err());
        assert!(validate_definition("PAT", 13, 1).is_err());
        assert!(validate_definition("PAT", 4, 0).is_err());
        assert!(validate_definition("ABCDEFGHIJKLMNOPQ", 4, 1).is_err());
    }
}
