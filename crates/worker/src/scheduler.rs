//! Tick loop that runs each job when its recurrence is due.
//!
//! Last-run dates live in memory only. After a restart every job runs once
//! on the first tick; per-period dedupe makes that rerun a no-op.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use regsuite_core::types::Date;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::config::WorkerConfig;
use crate::jobs::{Job, JobContext};

/// Tracks when each job last completed.
#[derive(Debug, Default)]
pub struct Schedule {
    last_runs: HashMap<Job, Date>,
}

impl Schedule {
    /// Jobs due on `today`, in registry order.
    pub fn due(&self, today: Date) -> Vec<Job> {
        Job::ALL
            .iter()
            .copied()
            .filter(|job| job.recurrence().is_due(self.last_runs.get(job).copied(), today))
            .collect()
    }

    pub fn mark_ran(&mut self, job: Job, today: Date) {
        self.last_runs.insert(job, today);
    }
}

/// Run due jobs every `config.tick_secs` until `cancel` is triggered.
pub async fn run(pool: PgPool, config: WorkerConfig, cancel: CancellationToken) {
    tracing::info!(tick_secs = config.tick_secs, "Job scheduler started");

    let mut schedule = Schedule::default();
    let mut interval = tokio::time::interval(Duration::from_secs(config.tick_secs.max(1)));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Job scheduler stopping");
                break;
            }
            _ = interval.tick() => {
                let ctx = JobContext::new(Utc::now(), &config);
                for job in schedule.due(ctx.today) {
                    if cancel.is_cancelled() {
                        break;
                    }
                    match job.run(&pool, &ctx).await {
                        Ok(report) => {
                            tracing::debug!(job = job.name(), %report, "Job finished");
                            schedule.mark_ran(job, ctx.today);
                        }
                        // Not marked: retried on the next tick.
                        Err(e) => {
                            tracing::error!(job = job.name(), error = %e, "Job failed");
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn everything_is_due_on_first_tick() {
        let schedule = Schedule::default();
        assert_eq!(schedule.due(d(2026, 4, 9)), Job::ALL.to_vec());
    }

    #[test]
    fn only_daily_jobs_come_back_the_next_day() {
        let mut schedule = Schedule::default();
        let today = d(2026, 4, 8); // Wednesday
        for job in schedule.due(today) {
            schedule.mark_ran(job, today);
        }
        assert!(schedule.due(today).is_empty());

        let due = schedule.due(d(2026, 4, 9));
        assert!(due.contains(&Job::DailyAttendance));
        assert!(due.contains(&Job::LicenseExpiryReminder));
        assert!(!due.contains(&Job::WeeklyAttendanceReport));
        assert!(!due.contains(&Job::MonthlyHospitalReport));
    }
}
