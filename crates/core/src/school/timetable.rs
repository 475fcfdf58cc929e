//! Timetable slots.
//!
//! Times are stored as fractional hours (`9.5` is 09:30), as entered in the
//! timetable grid.

use crate::error::CoreError;

define_choice! {
    Weekday("day of week") {
        Monday = "monday",
        Tuesday = "tuesday",
        Wednesday = "wednesday",
        Thursday = "thursday",
        Friday = "friday",
        Saturday = "saturday",
    }
}

impl Weekday {
    /// Capitalised day name.
    pub fn title(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

/// `HH:MM` rendering of fractional hours; minutes are truncated.
pub fn float_to_time(hours: f64) -> String {
    let h = hours.trunc() as i64;
    let m = ((hours - hours.trunc()) * 60.0) as i64;
    format!("{h:02}:{m:02}")
}

/// `"{Day} - {HH:MM} - {subject}"`.
pub fn period_name(day: Weekday, start_time: f64, subject: &str) -> String {
    format!("{} - {} - {subject}", day.title(), float_to_time(start_time))
}

/// Slot must fit within the day and start strictly before it ends.
pub fn validate_slot(start_time: f64, end_time: f64) -> Result<(), CoreError> {
    for (label, t) in [("Start time", start_time), ("End time", end_time)] {
        if !(0.0..24.0).contains(&t) {
            return Err(CoreError::Validation(format!(
                "{label} must be between 0 and 24 (got {t})"
            )));
        }
    }
    if start_time >= end_time {
        return Err(CoreError::Validation(format!(
            "Start time {} must be before end time {}",
            float_to_time(start_time),
            float_to_time(end_time)
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_hours_render_as_clock_time() {
        assert_eq!(float_to_time(9.5), "09:30");
        assert_eq!(float_to_time(13.25), "13:15");
        assert_eq!(float_to_time(0.0), "00:00");
    }

    #[test]
    fn period_name_combines_day_time_subject() {
        assert_eq!(
            period_name(Weekday::Tuesday, 10.75, "Physics"),
            "Tuesday - 10:45 - Physics"
        );
    }

    #[test]
    fn slot_bounds() {
        assert!(validate_slot(9.0, 10.0).is_ok());
        assert!(validate_slot(10.0, 10.0).is_err());
        assert!(validate_slot(11.0, 10.0).is_err());
        assert!(validate_slot(-1.0, 10.0).is_err());
        assert!(validate_slot(9.0, 24.5).is_err());
    }
}
