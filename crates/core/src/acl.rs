//! Role-based access matrix.
//!
//! Maps (entity type, operation) to the roles allowed to perform it. The
//! `admin` role may do everything; every other role only what its row grants.
//! Role names must match the `role` claim issued in access tokens.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_RECEPTIONIST: &str = "receptionist";
pub const ROLE_NURSE: &str = "nurse";
pub const ROLE_DOCTOR: &str = "doctor";
pub const ROLE_PHARMACIST: &str = "pharmacist";
pub const ROLE_TEACHER: &str = "teacher";
pub const ROLE_CLASS_TEACHER: &str = "class_teacher";
pub const ROLE_ACCOUNTANT: &str = "accountant";
pub const ROLE_REGULATORY_OFFICER: &str = "regulatory_officer";
pub const ROLE_UAF_OFFICER: &str = "uaf_officer";

/// All known roles.
pub const VALID_ROLES: &[&str] = &[
    ROLE_ADMIN,
    ROLE_RECEPTIONIST,
    ROLE_NURSE,
    ROLE_DOCTOR,
    ROLE_PHARMACIST,
    ROLE_TEACHER,
    ROLE_CLASS_TEACHER,
    ROLE_ACCOUNTANT,
    ROLE_REGULATORY_OFFICER,
    ROLE_UAF_OFFICER,
];

/// Entity type names used as ACL keys.
pub mod entity {
    pub const OPERATOR: &str = "operator";
    pub const LICENSE: &str = "license";
    pub const SITE: &str = "site";
    pub const UAF_DECLARATION: &str = "uaf_declaration";
    pub const PATIENT: &str = "patient";
    pub const APPOINTMENT: &str = "appointment";
    pub const PRESCRIPTION: &str = "prescription";
    pub const MEDICINE: &str = "medicine";
    pub const EMERGENCY: &str = "emergency";
    pub const VITAL_SIGN: &str = "vital_sign";
    pub const ICU_BED: &str = "icu_bed";
    pub const DOSE_UNIT: &str = "dose_unit";
    pub const STUDENT: &str = "student";
    pub const SCHOOL_CLASS: &str = "class";
    pub const TEACHER: &str = "teacher";
    pub const ACADEMIC_YEAR: &str = "academic_year";
    pub const TIMETABLE: &str = "timetable";
    pub const GRADE: &str = "grade";
    pub const FEE: &str = "fee";
    pub const ATTENDANCE: &str = "attendance";
    pub const REPORT: &str = "report";
    pub const SEQUENCE: &str = "sequence";
}

define_choice! {
    /// Operation kinds checked by the matrix.
    Operation("operation") {
        Read = "read",
        Write = "write",
        Create = "create",
        Unlink = "unlink",
    }
}

use Operation::{Create, Read, Unlink, Write};

const R: &[Operation] = &[Read];
const RW: &[Operation] = &[Read, Write];
const RC: &[Operation] = &[Read, Create];
const RWC: &[Operation] = &[Read, Write, Create];
const RWCU: &[Operation] = &[Read, Write, Create, Unlink];
const NONE: &[Operation] = &[];

/// Operations `role` may perform on `entity` (excluding the admin bypass).
pub fn grants(entity: &str, role: &str) -> &'static [Operation] {
    use self::entity as e;

    match (entity, role) {
        (e::PATIENT, ROLE_RECEPTIONIST) => RC,
        (e::PATIENT, ROLE_NURSE) => RW,
        (e::PATIENT, ROLE_DOCTOR) => RWC,

        (e::PRESCRIPTION, ROLE_DOCTOR) => RWC,
        (e::PRESCRIPTION, ROLE_PHARMACIST) => RW,

        (e::APPOINTMENT, ROLE_RECEPTIONIST) => RWC,
        (e::APPOINTMENT, ROLE_NURSE) => R,
        (e::APPOINTMENT, ROLE_DOCTOR) => RW,

        (e::EMERGENCY | e::VITAL_SIGN, ROLE_NURSE | ROLE_DOCTOR) => RWC,
        (e::EMERGENCY | e::VITAL_SIGN, ROLE_RECEPTIONIST) => R,

        (e::ICU_BED, ROLE_NURSE) => RW,
        (e::ICU_BED, ROLE_RECEPTIONIST | ROLE_DOCTOR) => R,

        (e::MEDICINE | e::DOSE_UNIT, ROLE_PHARMACIST) => RWC,
        (e::MEDICINE | e::DOSE_UNIT, ROLE_DOCTOR) => R,

        (e::STUDENT, ROLE_TEACHER) => R,
        (e::STUDENT, ROLE_CLASS_TEACHER) => RW,

        (e::GRADE | e::ATTENDANCE, ROLE_TEACHER | ROLE_CLASS_TEACHER) => RWC,

        (e::FEE, ROLE_ACCOUNTANT) => RWC,

        (
            e::SCHOOL_CLASS | e::TEACHER | e::ACADEMIC_YEAR | e::TIMETABLE,
            ROLE_TEACHER | ROLE_CLASS_TEACHER,
        ) => R,

        (e::OPERATOR | e::LICENSE | e::SITE, ROLE_REGULATORY_OFFICER) => RWCU,
        (e::OPERATOR | e::LICENSE | e::SITE, ROLE_UAF_OFFICER) => R,

        (e::UAF_DECLARATION, ROLE_UAF_OFFICER) => RWCU,
        (e::UAF_DECLARATION, ROLE_REGULATORY_OFFICER) => R,

        (e::REPORT, _) => R,

        _ => NONE,
    }
}

/// Whether `role` may perform `op` on `entity`.
pub fn is_allowed(entity: &str, role: &str, op: Operation) -> bool {
    role == ROLE_ADMIN || grants(entity, role).contains(&op)
}

/// Like [`is_allowed`], but produces a `Forbidden` error for the caller.
pub fn check_access(entity: &str, role: &str, op: Operation) -> Result<(), CoreError> {
    if is_allowed(entity, role, op) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Role '{role}' is not allowed to {op} {entity} records"
        )))
    }
}

/// Validate that a role name is one of the known roles.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_can_do_everything() {
        for op in Operation::ALL {
            assert!(is_allowed(entity::PATIENT, ROLE_ADMIN, *op));
            assert!(is_allowed(entity::FEE, ROLE_ADMIN, *op));
        }
    }

    #[test]
    fn receptionist_registers_but_cannot_edit_or_delete_patients() {
        assert!(is_allowed(entity::PATIENT, ROLE_RECEPTIONIST, Operation::Create));
        assert!(is_allowed(entity::PATIENT, ROLE_RECEPTIONIST, Operation::Read));
        assert!(!is_allowed(entity::PATIENT, ROLE_RECEPTIONIST, Operation::Write));
        assert!(!is_allowed(entity::PATIENT, ROLE_RECEPTIONIST, Operation::Unlink));
    }

    #[test]
    fn pharmacist_cannot_create_prescriptions() {
        assert!(is_allowed(entity::PRESCRIPTION, ROLE_PHARMACIST, Operation::Write));
        assert!(!is_allowed(entity::PRESCRIPTION, ROLE_PHARMACIST, Operation::Create));
    }

    #[test]
    fn teacher_reads_students_class_teacher_edits() {
        assert!(!is_allowed(entity::STUDENT, ROLE_TEACHER, Operation::Write));
        assert!(is_allowed(entity::STUDENT, ROLE_CLASS_TEACHER, Operation::Write));
    }

    #[test]
    fn unlisted_pairs_are_denied() {
        assert!(!is_allowed(entity::FEE, ROLE_NURSE, Operation::Read));
        assert!(!is_allowed("unknown", ROLE_DOCTOR, Operation::Read));
    }

    #[test]
    fn every_role_reads_reports() {
        for role in VALID_ROLES {
            assert!(is_allowed(entity::REPORT, role, Operation::Read));
        }
    }

    #[test]
    fn forbidden_message_names_role_and_entity() {
        let err = check_access(entity::ICU_BED, ROLE_RECEPTIONIST, Operation::Unlink).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Forbidden: Role 'receptionist' is not allowed to unlink icu_bed records"
        );
    }

    #[test]
    fn role_validation() {
        assert!(validate_role(ROLE_DOCTOR).is_ok());
        assert!(validate_role("janitor").is_err());
    }
}
