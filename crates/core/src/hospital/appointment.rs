//! Appointment scheduling rules.

use chrono::Duration;

use crate::error::CoreError;
use crate::types::{Date, Timestamp};

/// Default consultation length in hours.
pub const DEFAULT_DURATION_HOURS: f64 = 0.5;

/// Longest appointment that can be booked, in hours.
pub const MAX_DURATION_HOURS: f64 = 24.0;

/// Completed appointments this many days old trigger a follow-up call.
pub const FOLLOW_UP_AFTER_DAYS: i64 = 7;

define_states! {
    AppointmentState("appointment") {
        Draft = "draft",
        Confirmed = "confirmed",
        InConsultation = "in_consultation",
        Done = "done",
        Cancelled = "cancelled",
    }
    transitions {
        Draft => [Confirmed, Cancelled],
        Confirmed => [InConsultation, Cancelled],
        InConsultation => [Done],
        Done => [],
        Cancelled => [],
    }
}

define_choice! {
    Priority("priority") {
        Normal = "normal",
        Urgent = "urgent",
        Emergency = "emergency",
    }
}

/// Start plus the duration, rounded to the second.
pub fn appointment_end(start: Timestamp, duration_hours: f64) -> Timestamp {
    start + Duration::seconds((duration_hours * 3600.0).round() as i64)
}

pub fn validate_duration(duration_hours: f64) -> Result<(), CoreError> {
    if !(duration_hours > 0.0 && duration_hours <= MAX_DURATION_HOURS) {
        return Err(CoreError::Validation(format!(
            "Appointment duration must be greater than 0 and at most {MAX_DURATION_HOURS} hours (got {duration_hours})"
        )));
    }
    Ok(())
}

/// `[now - (days + 1), now - days]`: the one-day slice of completed
/// appointments that are due a follow-up at `now`.
pub fn follow_up_window(now: Timestamp, days: i64) -> (Timestamp, Timestamp) {
    let upper = now - Duration::days(days);
    (upper - Duration::days(1), upper)
}

/// The reminder for a confirmed appointment is due the day before it.
pub fn reminder_due_date(start: Timestamp) -> Date {
    (start - Duration::days(1)).date_naive()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::lifecycle::StateMachine;

    #[test]
    fn end_adds_fractional_hours() {
        let start = Utc.with_ymd_and_hms(2026, 5, 4, 9, 0, 0).unwrap();
        assert_eq!(
            appointment_end(start, 0.5),
            Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap()
        );
        assert_eq!(
            appointment_end(start, 1.25),
            Utc.with_ymd_and_hms(2026, 5, 4, 10, 15, 0).unwrap()
        );
    }

    #[test]
    fn duration_bounds() {
        assert!(validate_duration(DEFAULT_DURATION_HOURS).is_ok());
        assert!(validate_duration(0.0).is_err());
        assert!(validate_duration(-1.0).is_err());
        assert!(validate_duration(25.0).is_err());
        assert!(validate_duration(f64::NAN).is_err());
    }

    #[test]
    fn only_draft_or_confirmed_can_be_cancelled() {
        assert!(AppointmentState::Draft.can_transition(AppointmentState::Cancelled));
        assert!(AppointmentState::Confirmed.can_transition(AppointmentState::Cancelled));
        assert!(!AppointmentState::InConsultation.can_transition(AppointmentState::Cancelled));
        assert!(!AppointmentState::Done.can_transition(AppointmentState::Cancelled));
    }

    #[test]
    fn consultation_cannot_be_skipped() {
        let err = AppointmentState::Confirmed
            .transition(AppointmentState::Done)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot move appointment from 'confirmed' to 'done'"
        );
    }

    #[test]
    fn follow_up_window_is_one_day_wide() {
        let now = Utc.with_ymd_and_hms(2026, 5, 20, 2, 0, 0).unwrap();
        let (from, to) = follow_up_window(now, FOLLOW_UP_AFTER_DAYS);
        assert_eq!(to, Utc.with_ymd_and_hms(2026, 5, 13, 2, 0, 0).unwrap());
        assert_eq!(from, Utc.with_ymd_and_hms(2026, 5, 12, 2, 0, 0).unwrap());
    }

    #[test]
    fn reminder_is_due_the_day_before() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(reminder_due_date(start), Date::from_ymd_opt(2026, 2, 28).unwrap());
    }
}
