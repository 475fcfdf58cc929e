//! Age computation from a date of birth.
//!
//! Two distinct rules are in use and must not be mixed:
//!
//! - [`calendar_age`]: whole years, months and days elapsed, using calendar
//!   subtraction (hospital patients).
//! - [`approximate_years`]: elapsed days divided by 365 (HMIS patients and
//!   students).

use chrono::Datelike;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Date;

/// Elapsed time as a calendar decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarAge {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

/// Calendar-aware age of someone born on `dob`, as of `today`.
///
/// Returns `None` when `dob` is after `today`. When the day of month has not
/// yet been reached, a month is borrowed and the length of the month before
/// `today`'s month is added to the day difference. A birth day later than that
/// month's length can still leave the difference negative; it is clamped to 0.
pub fn calendar_age(dob: Date, today: Date) -> Option<CalendarAge> {
    if dob > today {
        return None;
    }

    let mut total_months =
        (today.year() - dob.year()) * 12 + today.month() as i32 - dob.month() as i32;
    let mut days = today.day() as i32 - dob.day() as i32;
    if days < 0 {
        total_months -= 1;
        days += days_in_previous_month(today)? as i32;
    }
    let total_months = total_months.max(0) as u32;

    Some(CalendarAge {
        years: total_months / 12,
        months: total_months % 12,
        days: days.max(0) as u32,
    })
}

/// Length of the month preceding `date`'s month (December for January).
fn days_in_previous_month(date: Date) -> Option<u32> {
    date.with_day(1)?.pred_opt().map(|last| last.day())
}

/// Human-readable age as shown on the patient form.
pub fn describe_age(dob: Option<Date>, today: Date) -> String {
    let Some(dob) = dob else {
        return "Date of birth not set".to_string();
    };
    match calendar_age(dob, today) {
        Some(age) => format!(
            "{} year(s), {} month(s), {} day(s) old",
            age.years, age.months, age.days
        ),
        None => format!("Will be born in {} day(s)", (dob - today).num_days()),
    }
}

/// Whole years as elapsed days / 365, floored. Zero when `dob` is unset.
pub fn approximate_years(dob: Option<Date>, today: Date) -> i32 {
    match dob {
        Some(dob) => (today - dob).num_days().div_euclid(365) as i32,
        None => 0,
    }
}

/// Reject a reference date that lies after `today`.
pub fn validate_not_future(label: &str, date: Date, today: Date) -> Result<(), CoreError> {
    if date > today {
        return Err(CoreError::Validation(format!(
            "{label} cannot be in the future ({date} is after {today})"
        )));
    }
    Ok(())
}

/// Label for a registration date relative to `today` ("Today", "Yesterday",
/// or e.g. "Mar 04, 2026").
pub fn day_label(date: Date, today: Date) -> String {
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        date.format("%b %d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn exact_birthday_has_zero_months_and_days() {
        let age = calendar_age(d(2000, 3, 15), d(2024, 3, 15)).unwrap();
        assert_eq!(age, CalendarAge { years: 24, months: 0, days: 0 });
    }

    #[test]
    fn borrows_a_month_when_day_not_reached() {
        // 2024 is a leap year: 20 Feb -> 10 Mar is 19 days.
        let age = calendar_age(d(2000, 5, 20), d(2024, 3, 10)).unwrap();
        assert_eq!(age, CalendarAge { years: 23, months: 9, days: 19 });
    }

    #[test]
    fn borrow_across_january_uses_december() {
        let age = calendar_age(d(2010, 12, 25), d(2025, 1, 5)).unwrap();
        assert_eq!(age, CalendarAge { years: 14, months: 0, days: 11 });
    }

    #[test]
    fn borrowed_days_come_from_month_before_today() {
        // February 2023 has 28 days: 10 - 30 + 28.
        let age = calendar_age(d(2023, 1, 30), d(2023, 3, 10)).unwrap();
        assert_eq!(age, CalendarAge { years: 0, months: 1, days: 8 });
    }

    #[test]
    fn late_birth_day_in_short_month_clamps_to_zero_days() {
        // 1 - 31 + 28 is negative.
        let age = calendar_age(d(2023, 1, 31), d(2023, 3, 1)).unwrap();
        assert_eq!(age, CalendarAge { years: 0, months: 1, days: 0 });
    }

    #[test]
    fn born_today_is_zero() {
        let age = calendar_age(d(2026, 6, 1), d(2026, 6, 1)).unwrap();
        assert_eq!(age, CalendarAge { years: 0, months: 0, days: 0 });
    }

    #[test]
    fn future_birth_date_has_no_calendar_age() {
        assert!(calendar_age(d(2027, 1, 1), d(2026, 1, 1)).is_none());
    }

    #[test]
    fn describe_formats_all_three_cases() {
        let today = d(2024, 3, 10);
        assert_eq!(
            describe_age(Some(d(2000, 5, 20)), today),
            "23 year(s), 9 month(s), 19 day(s) old"
        );
        assert_eq!(
            describe_age(Some(d(2024, 3, 15)), today),
            "Will be born in 5 day(s)"
        );
        assert_eq!(describe_age(None, today), "Date of birth not set");
    }

    #[test]
    fn approximate_years_divides_days_by_365() {
        // 2000-03-01 .. 2024-02-26 is 8762 days; 8762 / 365 = 24 even though
        // the calendar birthday has not been reached yet.
        let dob = d(2000, 3, 1);
        let today = d(2024, 2, 26);
        assert_eq!(approximate_years(Some(dob), today), 24);
        assert_eq!(calendar_age(dob, today).unwrap().years, 23);
    }

    #[test]
    fn approximate_years_is_zero_without_dob() {
        assert_eq!(approximate_years(None, d(2024, 1, 1)), 0);
    }

    #[test]
    fn future_reference_date_is_rejected() {
        let today = d(2024, 1, 1);
        assert!(validate_not_future("Date of birth", d(2024, 1, 1), today).is_ok());
        let err = validate_not_future("Date of birth", d(2024, 1, 2), today).unwrap_err();
        assert!(err.to_string().contains("Date of birth cannot be in the future"));
    }

    #[test]
    fn day_label_today_yesterday_and_older() {
        let today = d(2026, 3, 4);
        assert_eq!(day_label(today, today), "Today");
        assert_eq!(day_label(d(2026, 3, 3), today), "Yesterday");
        assert_eq!(day_label(d(2026, 2, 1), today), "Feb 01, 2026");
    }
}
