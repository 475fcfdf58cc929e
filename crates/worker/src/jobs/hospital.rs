//! Hospital jobs.

use chrono::Datelike;
use regsuite_core::activity::{self, ActivityType};
use regsuite_core::batch::{BatchReport, ItemOutcome};
use regsuite_core::hospital::{appointment, reporting};
use regsuite_db::models::activity::CreateActivity;
use regsuite_db::models::appointment::FollowUpCandidate;
use regsuite_db::repositories::{ActivityRepo, AppointmentRepo, HospitalReportRepo};
use sqlx::PgPool;

use super::{tally, Job, JobContext};

/// Entity type the monthly report activity is filed under; its id is the
/// month as `YYYYMM`.
pub const MONTHLY_REPORT_ENTITY: &str = "hospital_report";

/// Daily: patients whose appointment was completed `follow_up_days` ago get
/// a call activity assigned to their doctor.
pub async fn patient_follow_up(pool: &PgPool, ctx: &JobContext) -> Result<BatchReport, sqlx::Error> {
    let (from, to) = appointment::follow_up_window(ctx.now, ctx.follow_up_days);
    let candidates = AppointmentRepo::list_follow_up_candidates(pool, from, to).await?;

    let mut report = BatchReport::default();
    for candidate in &candidates {
        let result = follow_up(pool, candidate).await;
        tally(&mut report, Job::PatientFollowUp, candidate.appointment_id, result);
    }

    tracing::info!(job = Job::PatientFollowUp.name(), %report, "Patient follow-ups created");
    Ok(report)
}

fn follow_up_activity(candidate: &FollowUpCandidate) -> CreateActivity {
    CreateActivity {
        entity_type: "patient".into(),
        entity_id: candidate.patient_id,
        activity_type: ActivityType::Call.as_str().into(),
        summary: "Patient Follow-up".into(),
        note: Some(format!(
            "Follow up with {} regarding appointment on {}",
            candidate.patient_name,
            candidate.appointment_date.format("%Y-%m-%d %H:%M")
        )),
        assigned_to: candidate.doctor_login.clone(),
        due_date: None,
        // One follow-up per appointment, whatever day the job catches it.
        dedupe_key: Some(activity::dedupe_key(
            Job::PatientFollowUp.name(),
            "appointment",
            candidate.appointment_id,
            candidate.appointment_date.date_naive(),
        )),
    }
}

async fn follow_up(pool: &PgPool, candidate: &FollowUpCandidate) -> Result<ItemOutcome, sqlx::Error> {
    let created = ActivityRepo::create_once(pool, &follow_up_activity(candidate)).await?;
    Ok(match created {
        Some(_) => ItemOutcome::Affected,
        None => ItemOutcome::Skipped,
    })
}

/// Monthly: statistics for the previous month, logged and filed as one
/// report activity.
pub async fn monthly_report(pool: &PgPool, ctx: &JobContext) -> Result<BatchReport, sqlx::Error> {
    let (first, last) = reporting::previous_month_range(ctx.today);
    let stats = HospitalReportRepo::monthly_stats(pool, first, last).await?;

    tracing::info!(
        job = Job::MonthlyHospitalReport.name(),
        period = %stats.period,
        total_patients = stats.total_patients,
        new_patients = stats.new_patients,
        total_appointments = stats.total_appointments,
        completed_appointments = stats.completed_appointments,
        "Monthly hospital report"
    );

    let month_id = i64::from(first.year()) * 100 + i64::from(first.month());
    let input = CreateActivity {
        entity_type: MONTHLY_REPORT_ENTITY.into(),
        entity_id: month_id,
        activity_type: ActivityType::Report.as_str().into(),
        summary: format!("Monthly HMIS Report - {}", stats.period),
        note: Some(stats.summary_note()),
        assigned_to: None,
        due_date: Some(ctx.today),
        dedupe_key: Some(activity::period_key(
            Job::MonthlyHospitalReport.name(),
            &first.format("%Y-%m").to_string(),
        )),
    };

    let mut report = BatchReport::default();
    let result = ActivityRepo::create_once(pool, &input)
        .await
        .map(|created| match created {
            Some(_) => ItemOutcome::Affected,
            None => ItemOutcome::Skipped,
        });
    tally(&mut report, Job::MonthlyHospitalReport, month_id, result);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn follow_up_is_keyed_by_appointment() {
        let candidate = FollowUpCandidate {
            appointment_id: 77,
            appointment_date: Utc.with_ymd_and_hms(2026, 4, 2, 10, 30, 0).unwrap(),
            patient_id: 5,
            patient_name: "Asha Rao".into(),
            doctor_login: Some("dr.mehta".into()),
        };
        let activity = follow_up_activity(&candidate);
        assert_eq!(activity.entity_type, "patient");
        assert_eq!(activity.entity_id, 5);
        assert_eq!(activity.activity_type, "call");
        assert_eq!(activity.assigned_to.as_deref(), Some("dr.mehta"));
        assert_eq!(
            activity.note.as_deref(),
            Some("Follow up with Asha Rao regarding appointment on 2026-04-02 10:30")
        );
        assert_eq!(
            activity.dedupe_key.as_deref(),
            Some("patient_follow_up:appointment:77:2026-04-02")
        );
    }
}
