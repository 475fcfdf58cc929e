//! Activities: to-dos, reminders and notes attached to a record.
//!
//! Activities created by scheduled jobs carry a dedupe key naming the job, the
//! record and the period, so a second run over the same period finds the key
//! taken and skips the record.

use crate::types::{Date, DbId};

define_choice! {
    ActivityType("activity type") {
        Todo = "todo",
        Call = "call",
        Reminder = "reminder",
        Report = "report",
        Notification = "notification",
    }
}

/// Dedupe key for a per-record, per-period activity:
/// `"{job}:{entity_type}:{entity_id}:{period}"`.
pub fn dedupe_key(job: &str, entity_type: &str, entity_id: DbId, period: Date) -> String {
    format!("{job}:{entity_type}:{entity_id}:{period}")
}

/// Dedupe key for a run-level activity that is not tied to one record.
pub fn period_key(job: &str, period: &str) -> String {
    format!("{job}:{period}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupe_key_is_stable_per_period() {
        let day = Date::from_ymd_opt(2026, 4, 9).unwrap();
        assert_eq!(
            dedupe_key("license_expiry_reminder", "license", 42, day),
            "license_expiry_reminder:license:42:2026-04-09"
        );
        assert_ne!(
            dedupe_key("license_expiry_reminder", "license", 42, day),
            dedupe_key("license_expiry_reminder", "license", 42, day.succ_opt().unwrap())
        );
    }

    #[test]
    fn period_key_joins_job_and_period() {
        assert_eq!(period_key("monthly_hospital_report", "2026-03"), "monthly_hospital_report:2026-03");
    }
}
