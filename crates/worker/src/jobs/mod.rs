//! Job registry.
//!
//! Jobs are idempotent per period: records they create carry a dedupe key
//! or hit a unique constraint, so a second run in the same period skips
//! every entity instead of duplicating work.

pub mod hospital;
pub mod operator;
pub mod school;

use chrono::Datelike;
use regsuite_core::batch::BatchReport;
use regsuite_core::types::{Date, Timestamp};
use serde::Serialize;
use sqlx::PgPool;

use crate::config::WorkerConfig;

/// How often a job is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    /// Whether a job last run on `last_run` is due again on `today`.
    pub fn is_due(self, last_run: Option<Date>, today: Date) -> bool {
        let Some(last) = last_run else {
            return true;
        };
        match self {
            Recurrence::Daily => last != today,
            Recurrence::Weekly => last.iso_week() != today.iso_week(),
            Recurrence::Monthly => (last.year(), last.month()) != (today.year(), today.month()),
        }
    }
}

/// Inputs shared by every job run.
#[derive(Debug, Clone)]
pub struct JobContext {
    pub now: Timestamp,
    pub today: Date,
    pub license_reminder_days: i64,
    pub follow_up_days: i64,
}

impl JobContext {
    pub fn new(now: Timestamp, config: &WorkerConfig) -> Self {
        Self {
            now,
            today: now.date_naive(),
            license_reminder_days: config.license_reminder_days,
            follow_up_days: config.follow_up_days,
        }
    }
}

/// Every scheduled procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Job {
    LicenseExpiryReminder,
    PatientFollowUp,
    MonthlyHospitalReport,
    DailyAttendance,
    WeeklyAttendanceReport,
    PromoteStudents,
    OverdueFees,
}

impl Job {
    pub const ALL: &'static [Job] = &[
        Job::LicenseExpiryReminder,
        Job::PatientFollowUp,
        Job::MonthlyHospitalReport,
        Job::DailyAttendance,
        Job::WeeklyAttendanceReport,
        Job::PromoteStudents,
        Job::OverdueFees,
    ];

    /// Name used in logs, dedupe keys and the admin endpoint.
    pub fn name(self) -> &'static str {
        match self {
            Job::LicenseExpiryReminder => "license_expiry_reminder",
            Job::PatientFollowUp => "patient_follow_up",
            Job::MonthlyHospitalReport => "monthly_hospital_report",
            Job::DailyAttendance => "daily_attendance",
            Job::WeeklyAttendanceReport => "weekly_attendance_report",
            Job::PromoteStudents => "promote_students",
            Job::OverdueFees => "overdue_fees",
        }
    }

    pub fn recurrence(self) -> Recurrence {
        match self {
            Job::MonthlyHospitalReport => Recurrence::Monthly,
            Job::WeeklyAttendanceReport => Recurrence::Weekly,
            _ => Recurrence::Daily,
        }
    }

    pub fn from_name(name: &str) -> Option<Job> {
        Self::ALL.iter().copied().find(|job| job.name() == name)
    }

    /// Run the job once. Only a failure to load the entity set is an error;
    /// per-entity failures are logged and counted in the report.
    pub async fn run(self, pool: &PgPool, ctx: &JobContext) -> Result<BatchReport, sqlx::Error> {
        match self {
            Job::LicenseExpiryReminder => operator::license_expiry_reminder(pool, ctx).await,
            Job::PatientFollowUp => hospital::patient_follow_up(pool, ctx).await,
            Job::MonthlyHospitalReport => hospital::monthly_report(pool, ctx).await,
            Job::DailyAttendance => school::daily_attendance(pool, ctx).await,
            Job::WeeklyAttendanceReport => school::weekly_attendance_report(pool, ctx).await,
            Job::PromoteStudents => school::promote_students(pool, ctx).await,
            Job::OverdueFees => school::overdue_fees(pool, ctx).await,
        }
    }
}

/// Fold one entity's result into `report`, logging a failure.
pub(crate) fn tally<E: std::fmt::Display>(
    report: &mut BatchReport,
    job: Job,
    entity_id: regsuite_core::types::DbId,
    result: Result<regsuite_core::batch::ItemOutcome, E>,
) {
    if let Err(e) = &result {
        tracing::error!(job = job.name(), entity_id, error = %e, "Job item failed");
    }
    report.record(&result);
}

#[cfg(test)]
mod tests {
    use regsuite_core::batch::ItemOutcome;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn names_round_trip() {
        for job in Job::ALL {
            assert_eq!(Job::from_name(job.name()), Some(*job));
        }
        assert_eq!(Job::from_name("reticulate_splines"), None);
    }

    #[test]
    fn never_run_is_always_due() {
        for r in [Recurrence::Daily, Recurrence::Weekly, Recurrence::Monthly] {
            assert!(r.is_due(None, d(2026, 4, 9)));
        }
    }

    #[test]
    fn daily_is_due_on_a_new_date() {
        assert!(!Recurrence::Daily.is_due(Some(d(2026, 4, 9)), d(2026, 4, 9)));
        assert!(Recurrence::Daily.is_due(Some(d(2026, 4, 9)), d(2026, 4, 10)));
    }

    #[test]
    fn weekly_is_due_in_a_new_iso_week() {
        // 2026-04-06 is a Monday.
        assert!(!Recurrence::Weekly.is_due(Some(d(2026, 4, 6)), d(2026, 4, 12)));
        assert!(Recurrence::Weekly.is_due(Some(d(2026, 4, 12)), d(2026, 4, 13)));
    }

    #[test]
    fn monthly_is_due_in_a_new_month() {
        assert!(!Recurrence::Monthly.is_due(Some(d(2026, 4, 1)), d(2026, 4, 30)));
        assert!(Recurrence::Monthly.is_due(Some(d(2026, 4, 30)), d(2026, 5, 1)));
        assert!(Recurrence::Monthly.is_due(Some(d(2025, 5, 3)), d(2026, 5, 1)));
    }

    #[test]
    fn tally_counts_failures() {
        let mut report = BatchReport::default();
        tally::<String>(&mut report, Job::OverdueFees, 1, Ok(ItemOutcome::Affected));
        tally(&mut report, Job::OverdueFees, 2, Err("row locked".to_string()));
        assert_eq!(report.affected, 1);
        assert_eq!(report.failed, 1);
    }
}
