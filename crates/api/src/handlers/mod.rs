//! Request handlers, one submodule per entity type.
//!
//! Handlers check the access-control matrix through [`AuthUser::authorize`],
//! run the domain validators from `regsuite_core`, delegate persistence to
//! the `regsuite_db` repositories and map errors via [`AppError`].
//!
//! [`AuthUser::authorize`]: crate::middleware::auth::AuthUser::authorize

pub mod academic_years;
pub mod activities;
pub mod appointments;
pub mod attendance;
pub mod classes;
pub mod doctors;
pub mod emergency;
pub mod fees;
pub mod grades;
pub mod hospital_reports;
pub mod icu_beds;
pub mod jobs;
pub mod licenses;
pub mod medicines;
pub mod operators;
pub mod patients;
pub mod prescriptions;
pub mod school_reports;
pub mod sequences;
pub mod sites;
pub mod students;
pub mod teachers;
pub mod timetable;
pub mod uaf;
pub mod vital_signs;

use regsuite_core::error::CoreError;
use regsuite_core::lifecycle::{parse_state, StateMachine};
use regsuite_core::types::DbId;

use crate::error::AppError;

/// `404` for a missing `entity` row.
pub(crate) fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

/// Validate `current -> to` against the state table of `S`.
///
/// Returns the stored label of the current state, to be passed as the
/// `from` guard of the repository's `set_state` so a concurrent change is
/// detected.
pub(crate) fn check_transition<S>(current: &str, to: S) -> Result<&'static str, CoreError>
where
    S: StateMachine + std::str::FromStr<Err = CoreError>,
{
    let from: S = parse_state(current)?;
    from.transition(to)?;
    Ok(from.label())
}

/// The guarded update found the record in another state than the one just
/// read: somebody else moved it in between.
pub(crate) fn changed_concurrently(entity: &str, id: DbId) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "{entity} {id} was modified by another request; reload and retry"
    )))
}

/// Parse an optional choice field, rejecting unknown values.
pub(crate) fn check_choice<T>(value: Option<&str>) -> Result<(), CoreError>
where
    T: std::str::FromStr<Err = CoreError>,
{
    if let Some(v) = value {
        v.parse::<T>()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use regsuite_core::hospital::appointment::AppointmentState;
    use regsuite_core::person::Gender;

    use super::*;

    #[test]
    fn transition_returns_current_label() {
        assert_eq!(
            check_transition("draft", AppointmentState::Confirmed).unwrap(),
            "draft"
        );
    }

    #[test]
    fn illegal_transition_names_both_states() {
        let err = check_transition("done", AppointmentState::Confirmed).unwrap_err();
        assert_matches!(
            err,
            CoreError::InvalidTransition { from: "done", to: "confirmed", .. }
        );
    }

    #[test]
    fn unknown_stored_state_is_a_validation_error() {
        assert_matches!(
            check_transition("archived", AppointmentState::Confirmed),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn choice_accepts_none_and_known_values() {
        assert!(check_choice::<Gender>(None).is_ok());
        assert!(check_choice::<Gender>(Some("female")).is_ok());
        assert!(check_choice::<Gender>(Some("robot")).is_err());
    }
}
