//! Operator registry jobs.

use chrono::Duration;
use regsuite_core::activity::{self, ActivityType};
use regsuite_core::batch::{BatchReport, ItemOutcome};
use regsuite_core::operator;
use regsuite_db::models::activity::CreateActivity;
use regsuite_db::models::license::ExpiringLicense;
use regsuite_db::repositories::{ActivityRepo, LicenseRepo};
use sqlx::PgPool;

use super::{tally, Job, JobContext};

/// Daily: every active license expiring within the reminder window gets one
/// reminder per day on its record.
pub async fn license_expiry_reminder(
    pool: &PgPool,
    ctx: &JobContext,
) -> Result<BatchReport, sqlx::Error> {
    let cutoff = ctx.today + Duration::days(ctx.license_reminder_days);
    let licenses = LicenseRepo::list_expiring_before(pool, cutoff).await?;

    let mut report = BatchReport::default();
    for license in &licenses {
        let result = remind(pool, ctx, license).await;
        tally(&mut report, Job::LicenseExpiryReminder, license.id, result);
    }

    tracing::info!(
        job = Job::LicenseExpiryReminder.name(),
        %cutoff,
        %report,
        "License expiry reminders sent"
    );
    Ok(report)
}

fn reminder_for(license: &ExpiringLicense, ctx: &JobContext) -> CreateActivity {
    let days = operator::days_until_expiry(license.expiry_date, ctx.today);
    let summary = if days >= 0 {
        format!("License {} expires in {days} day(s)", license.license_number)
    } else {
        format!("License {} expired {} day(s) ago", license.license_number, -days)
    };
    CreateActivity {
        entity_type: "license".into(),
        entity_id: license.id,
        activity_type: ActivityType::Reminder.as_str().into(),
        summary,
        note: Some(format!(
            "Operator: {}",
            operator::display_name(license.partner_name.as_deref(), &license.operator_code)
        )),
        assigned_to: None,
        due_date: Some(license.expiry_date),
        dedupe_key: Some(activity::dedupe_key(
            Job::LicenseExpiryReminder.name(),
            "license",
            license.id,
            ctx.today,
        )),
    }
}

async fn remind(
    pool: &PgPool,
    ctx: &JobContext,
    license: &ExpiringLicense,
) -> Result<ItemOutcome, sqlx::Error> {
    let created = ActivityRepo::create_once(pool, &reminder_for(license, ctx)).await?;
    Ok(match created {
        Some(_) => ItemOutcome::Affected,
        None => ItemOutcome::Skipped,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use regsuite_core::types::Date;

    use super::*;
    use crate::config::WorkerConfig;

    fn license(expiry: Date) -> ExpiringLicense {
        ExpiringLicense {
            id: 11,
            license_number: "LIC00011".into(),
            license_type: "spectrum".into(),
            operator_id: 3,
            operator_code: "OP0003".into(),
            partner_name: Some("Bluewave".into()),
            expiry_date: expiry,
        }
    }

    fn ctx() -> JobContext {
        let now = Utc.with_ymd_and_hms(2026, 4, 9, 6, 0, 0).unwrap();
        JobContext::new(now, &WorkerConfig::default())
    }

    #[test]
    fn reminder_names_days_left_and_operator() {
        let ctx = ctx();
        let activity = reminder_for(&license(Date::from_ymd_opt(2026, 4, 19).unwrap()), &ctx);
        assert_eq!(activity.summary, "License LIC00011 expires in 10 day(s)");
        assert_eq!(activity.note.as_deref(), Some("Operator: Bluewave [OP0003]"));
        assert_eq!(activity.activity_type, "reminder");
        assert_eq!(
            activity.dedupe_key.as_deref(),
            Some("license_expiry_reminder:license:11:2026-04-09")
        );
    }

    #[test]
    fn lapsed_license_still_reminded() {
        let ctx = ctx();
        let activity = reminder_for(&license(Date::from_ymd_opt(2026, 4, 6).unwrap()), &ctx);
        assert_eq!(activity.summary, "License LIC00011 expired 3 day(s) ago");
    }
}
