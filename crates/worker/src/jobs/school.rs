//! School jobs.

use std::collections::HashMap;

use regsuite_core::activity::{self, ActivityType};
use regsuite_core::batch::{BatchReport, ItemOutcome};
use regsuite_core::lifecycle::{parse_state, StateMachine};
use regsuite_core::school::attendance::{self, AttendanceStatus};
use regsuite_core::school::class;
use regsuite_core::school::fee::{self, FeeState};
use regsuite_core::types::DbId;
use regsuite_db::models::activity::CreateActivity;
use regsuite_db::models::attendance::AttendanceSummary;
use regsuite_db::models::fee::OverdueFee;
use regsuite_db::repositories::{
    AcademicYearRepo, ActivityRepo, AttendanceRepo, FeeRepo, SchoolClassRepo, StudentRepo,
};
use sqlx::PgPool;

use super::{tally, Job, JobContext};

/// Daily: every active student without a record for today gets one, absent
/// until a teacher marks otherwise.
pub async fn daily_attendance(pool: &PgPool, ctx: &JobContext) -> Result<BatchReport, sqlx::Error> {
    let students = StudentRepo::list_active(pool, None).await?;
    let status = AttendanceStatus::GENERATED_DEFAULT.as_str();

    let mut report = BatchReport::default();
    for student in &students {
        let result = AttendanceRepo::create_if_absent(pool, student, ctx.today, status)
            .await
            .map(|created| {
                if created {
                    ItemOutcome::Affected
                } else {
                    ItemOutcome::Skipped
                }
            });
        tally(&mut report, Job::DailyAttendance, student.id, result);
    }

    tracing::info!(
        job = Job::DailyAttendance.name(),
        date = %ctx.today,
        %report,
        "Daily attendance generated"
    );
    Ok(report)
}

/// Weekly: students who were present less than the threshold last week get
/// an attendance report for their parents. Students without a parent email
/// are skipped.
pub async fn weekly_attendance_report(
    pool: &PgPool,
    ctx: &JobContext,
) -> Result<BatchReport, sqlx::Error> {
    let (start, end) = attendance::previous_week(ctx.today);
    let summaries = AttendanceRepo::summarize(pool, start, end).await?;

    let mut report = BatchReport::default();
    for summary in &summaries {
        let Some(input) = low_attendance_report(summary, start) else {
            continue;
        };
        let result = ActivityRepo::create_once(pool, &input)
            .await
            .map(|created| match created {
                Some(_) => ItemOutcome::Affected,
                None => ItemOutcome::Skipped,
            });
        tally(&mut report, Job::WeeklyAttendanceReport, summary.student_id, result);
    }

    tracing::info!(
        job = Job::WeeklyAttendanceReport.name(),
        week_start = %start,
        %report,
        "Weekly attendance reports sent"
    );
    Ok(report)
}

/// The report activity for a student, or `None` when attendance is fine or
/// there is nobody to send it to.
fn low_attendance_report(
    summary: &AttendanceSummary,
    week_start: regsuite_core::types::Date,
) -> Option<CreateActivity> {
    if !attendance::is_low_attendance(summary.present_days, summary.total_days) {
        return None;
    }
    let parent_email = summary.parent_email.as_deref().filter(|e| !e.trim().is_empty())?;
    let percentage = attendance::attendance_percentage(summary.present_days, summary.total_days)?;
    Some(CreateActivity {
        entity_type: "student".into(),
        entity_id: summary.student_id,
        activity_type: ActivityType::Report.as_str().into(),
        summary: format!("Weekly attendance report: {}", summary.student_name),
        note: Some(format!(
            "{} was present {} of {} day(s) ({percentage:.1}%) in the week of {week_start}. \
             Report sent to {parent_email}.",
            summary.student_name, summary.present_days, summary.total_days
        )),
        assigned_to: None,
        due_date: None,
        dedupe_key: Some(activity::dedupe_key(
            Job::WeeklyAttendanceReport.name(),
            "student",
            summary.student_id,
            week_start,
        )),
    })
}

/// Daily check, acting once per academic year: after the current year ends,
/// active students move to the next class. Students whose next class does
/// not exist stay where they are.
pub async fn promote_students(pool: &PgPool, ctx: &JobContext) -> Result<BatchReport, sqlx::Error> {
    let mut report = BatchReport::default();

    let Some(year) = AcademicYearRepo::find_current(pool).await? else {
        tracing::debug!(job = Job::PromoteStudents.name(), "No current academic year");
        return Ok(report);
    };
    if !class::promotion_due(year.end_date, year.promoted, ctx.today) {
        tracing::debug!(
            job = Job::PromoteStudents.name(),
            year = %year.name,
            end_date = %year.end_date,
            "Promotion not due"
        );
        return Ok(report);
    }

    let candidates = StudentRepo::list_promotion_candidates(pool, year.id).await?;
    let mut next_class: HashMap<String, Option<DbId>> = HashMap::new();

    for candidate in &candidates {
        let target_code = class::increment_class_code(&candidate.class_code);
        let target = match next_class.get(&target_code).copied() {
            Some(cached) => Ok(cached),
            None => SchoolClassRepo::find_by_code(pool, &target_code)
                .await
                .map(|found| {
                    let id = found.map(|c| c.id);
                    next_class.insert(target_code.clone(), id);
                    id
                }),
        };

        let result = match target {
            Ok(Some(class_id)) => {
                StudentRepo::move_to_class(pool, candidate.id, candidate.class_id, class_id)
                    .await
                    .map(|moved| {
                        if moved {
                            ItemOutcome::Affected
                        } else {
                            ItemOutcome::Skipped
                        }
                    })
            }
            Ok(None) => {
                tracing::debug!(
                    student_id = candidate.id,
                    class_code = %candidate.class_code,
                    "No next class, student not promoted"
                );
                Ok(ItemOutcome::Skipped)
            }
            Err(e) => Err(e),
        };
        tally(&mut report, Job::PromoteStudents, candidate.id, result);
    }

    AcademicYearRepo::mark_promoted(pool, year.id).await?;
    tracing::info!(
        job = Job::PromoteStudents.name(),
        year = %year.name,
        %report,
        "Students promoted"
    );
    Ok(report)
}

/// Daily: due or partially paid fees past their due date become overdue.
pub async fn overdue_fees(pool: &PgPool, ctx: &JobContext) -> Result<BatchReport, sqlx::Error> {
    let fees = FeeRepo::list_overdue_candidates(pool, ctx.today).await?;

    let mut report = BatchReport::default();
    for item in &fees {
        let result = flag_overdue(pool, ctx, item).await;
        tally(&mut report, Job::OverdueFees, item.id, result);
    }

    tracing::info!(job = Job::OverdueFees.name(), %report, "Overdue fees flagged");
    Ok(report)
}

#[derive(Debug, thiserror::Error)]
enum FeeJobError {
    #[error(transparent)]
    Core(#[from] regsuite_core::error::CoreError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

async fn flag_overdue(
    pool: &PgPool,
    ctx: &JobContext,
    item: &OverdueFee,
) -> Result<ItemOutcome, FeeJobError> {
    let state: FeeState = parse_state(&item.state)?;
    if !fee::is_overdue(state, item.due_date, ctx.today) {
        return Ok(ItemOutcome::Skipped);
    }
    let to = state.transition(FeeState::Overdue)?;
    let updated = FeeRepo::set_state(pool, item.id, state.as_str(), to.as_str()).await?;
    Ok(match updated {
        Some(_) => ItemOutcome::Affected,
        // Paid or changed between the scan and the update.
        None => ItemOutcome::Skipped,
    })
}

#[cfg(test)]
mod tests {
    use regsuite_core::types::Date;

    use super::*;

    fn summary(present: i64, total: i64, email: Option<&str>) -> AttendanceSummary {
        AttendanceSummary {
            student_id: 4,
            student_name: "Ravi Kumar".into(),
            parent_email: email.map(str::to_string),
            total_days: total,
            present_days: present,
        }
    }

    fn week() -> Date {
        Date::from_ymd_opt(2026, 3, 30).unwrap()
    }

    #[test]
    fn low_attendance_gets_a_report() {
        let activity = low_attendance_report(&summary(2, 5, Some("parent@example.com")), week())
            .expect("40% is below the threshold");
        assert_eq!(activity.entity_id, 4);
        assert_eq!(activity.activity_type, "report");
        assert_eq!(
            activity.note.as_deref(),
            Some(
                "Ravi Kumar was present 2 of 5 day(s) (40.0%) in the week of 2026-03-30. \
                 Report sent to parent@example.com."
            )
        );
        assert_eq!(
            activity.dedupe_key.as_deref(),
            Some("weekly_attendance_report:student:4:2026-03-30")
        );
    }

    #[test]
    fn good_attendance_is_not_reported() {
        assert!(low_attendance_report(&summary(4, 5, Some("parent@example.com")), week()).is_none());
    }

    #[test]
    fn missing_parent_email_is_not_reported() {
        assert!(low_attendance_report(&summary(0, 5, None), week()).is_none());
        assert!(low_attendance_report(&summary(0, 5, Some("  ")), week()).is_none());
    }
}
