//! Scheduled jobs against a real database: one write per entity, and a
//! second run in the same period skips instead of duplicating.

use assert_matches::assert_matches;
use chrono::{NaiveDate, TimeZone, Utc};
use regsuite_core::types::DbId;
use regsuite_db::models::academic_year::{AcademicYear, CreateAcademicYear};
use regsuite_db::models::activity::ActivityListParams;
use regsuite_db::models::fee::{CreateFeeType, Fee};
use regsuite_db::models::license::CreateLicense;
use regsuite_db::models::operator::CreateOperator;
use regsuite_db::models::school_class::CreateSchoolClass;
use regsuite_db::models::student::{CreateStudent, Student};
use regsuite_db::repositories::{
    AcademicYearRepo, ActivityRepo, AttendanceRepo, FeeRepo, LicenseRepo, OperatorRepo,
    SchoolClassRepo, StudentInsert, StudentRepo,
};
use regsuite_worker::{Job, JobContext, WorkerConfig};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Context for a run at 06:00 UTC on the given day.
fn ctx_on(y: i32, m: u32, d: u32) -> JobContext {
    let now = Utc.with_ymd_and_hms(y, m, d, 6, 0, 0).unwrap();
    JobContext::new(now, &WorkerConfig::default())
}

async fn activities_for(pool: &PgPool, entity_type: &str, entity_id: DbId) -> usize {
    let params = ActivityListParams {
        entity_type: Some(entity_type.into()),
        entity_id: Some(entity_id),
        open_only: None,
        limit: None,
        offset: None,
    };
    ActivityRepo::list(pool, &params, 100, 0).await.unwrap().len()
}

async fn current_year(pool: &PgPool) -> AcademicYear {
    AcademicYearRepo::create(
        pool,
        &CreateAcademicYear {
            name: "2025-2026".into(),
            start_date: date(2025, 6, 1),
            end_date: date(2026, 3, 31),
            is_current: true,
        },
    )
    .await
    .unwrap()
}

async fn student(pool: &PgPool, year: DbId, first: &str, parent_email: Option<&str>) -> Student {
    let class = match SchoolClassRepo::find_by_code(pool, "4A").await.unwrap() {
        Some(class) => class,
        None => SchoolClassRepo::create(
            pool,
            &CreateSchoolClass {
                name: "Class 4A".into(),
                code: "4A".into(),
                class_teacher_id: None,
                capacity: Some(30),
            },
        )
        .await
        .unwrap(),
    };
    let input = CreateStudent {
        student_id: None,
        first_name: first.into(),
        last_name: "Das".into(),
        date_of_birth: date(2016, 8, 3),
        gender: "female".into(),
        class_id: Some(class.id),
        section_id: None,
        academic_year_id: None,
        roll_number: None,
        enrollment_date: None,
        parent_name: None,
        parent_email: parent_email.map(str::to_string),
        phone: None,
        email: None,
        address: None,
        emergency_contact: None,
        emergency_phone: None,
        blood_group: None,
        medical_conditions: None,
        allergies: None,
    };
    assert_matches!(
        StudentRepo::create(pool, year, &input).await.unwrap(),
        StudentInsert::Created(s) => s
    )
}

// ---------------------------------------------------------------------------
// Operator registry
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn license_reminder_is_sent_once_per_day(pool: PgPool) {
    let operator = OperatorRepo::create(
        &pool,
        "OP0001",
        "admin",
        &CreateOperator {
            partner_name: Some("Bluewave".into()),
            operator_code: None,
            operator_type: "mno".into(),
            legal_name: None,
            trading_name: None,
            tin: None,
            registration_no: None,
            is_uaf_contributor: None,
            uaf_rate: None,
        },
    )
    .await
    .unwrap();
    let license = |number: &str, expiry: NaiveDate| CreateLicense {
        operator_id: operator.id,
        license_number: Some(number.into()),
        license_type: "operator".into(),
        issue_date: None,
        expiry_date: Some(expiry),
        fee_amount: None,
        currency: None,
        conditions: None,
    };
    let expiring = license("LIC00001", date(2026, 5, 1));
    let expiring = LicenseRepo::create(&pool, "LIC00001", "admin", &expiring).await.unwrap();
    // Outside the 90-day window.
    let distant = license("LIC00002", date(2027, 1, 1));
    let distant = LicenseRepo::create(&pool, "LIC00002", "admin", &distant).await.unwrap();

    let ctx = ctx_on(2026, 4, 9);
    let first = Job::LicenseExpiryReminder.run(&pool, &ctx).await.unwrap();
    assert_eq!((first.affected, first.skipped, first.failed), (1, 0, 0));

    let again = Job::LicenseExpiryReminder.run(&pool, &ctx).await.unwrap();
    assert_eq!((again.affected, again.skipped, again.failed), (0, 1, 0));
    assert_eq!(activities_for(&pool, "license", expiring.id).await, 1);
    assert_eq!(activities_for(&pool, "license", distant.id).await, 0);

    // The next day is a new period.
    let next_day = Job::LicenseExpiryReminder
        .run(&pool, &ctx_on(2026, 4, 10))
        .await
        .unwrap();
    assert_eq!(next_day.affected, 1);
    assert_eq!(activities_for(&pool, "license", expiring.id).await, 2);
}

// ---------------------------------------------------------------------------
// School
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn weekly_report_goes_to_parents_of_low_attendance_students_once(pool: PgPool) {
    let year = current_year(&pool).await;
    let absent = student(&pool, year.id, "Rina", Some("parent@example.com")).await;
    let no_email = student(&pool, year.id, "Tara", None).await;
    let regular = student(&pool, year.id, "Uma", Some("uma.parent@example.com")).await;

    // Week of Monday 2026-02-09, reported on Monday 2026-02-16.
    for day in 9..=13 {
        let day = date(2026, 2, day);
        AttendanceRepo::create_if_absent(&pool, &absent, day, "absent").await.unwrap();
        AttendanceRepo::create_if_absent(&pool, &no_email, day, "absent").await.unwrap();
        AttendanceRepo::create_if_absent(&pool, &regular, day, "present").await.unwrap();
    }

    let ctx = ctx_on(2026, 2, 16);
    let first = Job::WeeklyAttendanceReport.run(&pool, &ctx).await.unwrap();
    assert_eq!((first.affected, first.skipped, first.failed), (1, 0, 0));

    // Later in the same week the report already exists.
    let again = Job::WeeklyAttendanceReport
        .run(&pool, &ctx_on(2026, 2, 18))
        .await
        .unwrap();
    assert_eq!((again.affected, again.skipped, again.failed), (0, 1, 0));

    assert_eq!(activities_for(&pool, "student", absent.id).await, 1);
    assert_eq!(activities_for(&pool, "student", no_email.id).await, 0);
    assert_eq!(activities_for(&pool, "student", regular.id).await, 0);
}

async fn fee(pool: &PgPool, student: &Student, year: DbId, type_id: DbId, due: NaiveDate) -> Fee {
    let fee = FeeRepo::create(pool, None, student.id, year, type_id, 500.0, due)
        .await
        .unwrap();
    FeeRepo::set_state(pool, fee.id, "draft", "due").await.unwrap().unwrap()
}

async fn fee_state(pool: &PgPool, id: DbId) -> String {
    FeeRepo::find_by_id(pool, id).await.unwrap().unwrap().state
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn overdue_job_flags_unpaid_fees_past_their_due_date(pool: PgPool) {
    let year = current_year(&pool).await;
    let pupil = student(&pool, year.id, "Rina", None).await;
    let fee_type = FeeRepo::create_type(
        &pool,
        &CreateFeeType {
            name: "Transport".into(),
            code: "TRN".into(),
            amount: 500.0,
            description: None,
            is_recurring: true,
            recurrence: Some("monthly".into()),
        },
    )
    .await
    .unwrap();

    let late = fee(&pool, &pupil, year.id, fee_type.id, date(2026, 1, 10)).await;
    let not_yet = fee(&pool, &pupil, year.id, fee_type.id, date(2026, 1, 20)).await;
    let settled = fee(&pool, &pupil, year.id, fee_type.id, date(2026, 1, 5)).await;
    FeeRepo::mark_paid(&pool, settled.id, "due", date(2026, 1, 4))
        .await
        .unwrap()
        .unwrap();
    let partly = fee(&pool, &pupil, year.id, fee_type.id, date(2026, 1, 1)).await;
    let paid_on = date(2025, 12, 30);
    FeeRepo::record_payment(&pool, partly.id, "due", 0.0, 100.0, "partial", "cash", paid_on)
        .await
        .unwrap()
        .unwrap();

    let ctx = ctx_on(2026, 1, 15);
    let report = Job::OverdueFees.run(&pool, &ctx).await.unwrap();
    assert_eq!((report.affected, report.skipped, report.failed), (2, 0, 0));

    assert_eq!(fee_state(&pool, late.id).await, "overdue");
    assert_eq!(fee_state(&pool, partly.id).await, "overdue");
    assert_eq!(fee_state(&pool, not_yet.id).await, "due");
    assert_eq!(fee_state(&pool, settled.id).await, "paid");

    // Overdue fees are no longer candidates.
    let again = Job::OverdueFees.run(&pool, &ctx).await.unwrap();
    assert_eq!((again.affected, again.skipped, again.failed), (0, 0, 0));
}
