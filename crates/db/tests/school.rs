//! Roll numbers, attendance generation and promotion moves.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use regsuite_core::school::attendance::AttendanceStatus;
use regsuite_core::school::fee::{apply_payment, FeeState};
use regsuite_core::types::DbId;
use regsuite_db::models::academic_year::{AcademicYear, CreateAcademicYear};
use regsuite_db::models::fee::{CreateFeeType, Fee};
use regsuite_db::models::school_class::{CreateSchoolClass, SchoolClass};
use regsuite_db::models::student::{CreateStudent, Student};
use regsuite_db::repositories::{
    AcademicYearRepo, AttendanceRepo, FeeRepo, SchoolClassRepo, StudentInsert, StudentRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
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

async fn class(pool: &PgPool, code: &str) -> SchoolClass {
    SchoolClassRepo::create(
        pool,
        &CreateSchoolClass {
            name: format!("Class {code}"),
            code: code.into(),
            class_teacher_id: None,
            capacity: Some(30),
        },
    )
    .await
    .unwrap()
}

fn new_student(first: &str, class_id: DbId, roll_number: Option<i32>) -> CreateStudent {
    CreateStudent {
        student_id: None,
        first_name: first.into(),
        last_name: "Kumar".into(),
        date_of_birth: date(2015, 1, 10),
        gender: "male".into(),
        class_id: Some(class_id),
        section_id: None,
        academic_year_id: None,
        roll_number,
        enrollment_date: None,
        parent_name: None,
        parent_email: None,
        phone: None,
        email: None,
        address: None,
        emergency_contact: None,
        emergency_phone: None,
        blood_group: None,
        medical_conditions: None,
        allergies: None,
    }
}

async fn enroll(pool: &PgPool, year: DbId, input: &CreateStudent) -> Student {
    assert_matches!(
        StudentRepo::create(pool, year, input).await.unwrap(),
        StudentInsert::Created(s) => s
    )
}

// ---------------------------------------------------------------------------
// Roll numbers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn roll_numbers_follow_the_class_maximum(pool: PgPool) {
    let year = current_year(&pool).await;
    let class = class(&pool, "1A").await;

    let first = enroll(&pool, year.id, &new_student("Ravi", class.id, None)).await;
    let second = enroll(&pool, year.id, &new_student("Anil", class.id, Some(5))).await;
    let third = enroll(&pool, year.id, &new_student("Sita", class.id, None)).await;

    assert_eq!(first.roll_number, 1);
    assert_eq!(second.roll_number, 5);
    assert_eq!(third.roll_number, 6);
    assert_eq!(first.student_id, "STU00001");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn taken_roll_number_is_rejected(pool: PgPool) {
    let year = current_year(&pool).await;
    let class = class(&pool, "2B").await;
    enroll(&pool, year.id, &new_student("Ravi", class.id, Some(3))).await;

    assert_matches!(
        StudentRepo::create(&pool, year.id, &new_student("Anil", class.id, Some(3)))
            .await
            .unwrap(),
        StudentInsert::DuplicateRollNumber(3)
    );
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn attendance_generation_is_idempotent_per_day(pool: PgPool) {
    let year = current_year(&pool).await;
    let class = class(&pool, "3C").await;
    let student = enroll(&pool, year.id, &new_student("Ravi", class.id, None)).await;
    let day = date(2026, 2, 2);
    let status = AttendanceStatus::GENERATED_DEFAULT.as_str();

    assert!(AttendanceRepo::create_if_absent(&pool, &student, day, status).await.unwrap());
    assert!(!AttendanceRepo::create_if_absent(&pool, &student, day, status).await.unwrap());
    assert!(AttendanceRepo::create_if_absent(&pool, &student, day.succ_opt().unwrap(), status)
        .await
        .unwrap());

    let summary = AttendanceRepo::summarize(&pool, day, day.succ_opt().unwrap())
        .await
        .unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].total_days, 2);
    assert_eq!(summary[0].present_days, 0);
}

// ---------------------------------------------------------------------------
// Promotion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn promotion_moves_student_and_resets_roll_number(pool: PgPool) {
    let year = current_year(&pool).await;
    let from = class(&pool, "1A").await;
    let to = class(&pool, "2A").await;
    let student = enroll(&pool, year.id, &new_student("Ravi", from.id, None)).await;

    let candidates = StudentRepo::list_promotion_candidates(&pool, year.id).await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].class_code, "1A");

    assert!(StudentRepo::move_to_class(&pool, student.id, from.id, to.id).await.unwrap());
    // A second move from the old class finds nothing to do.
    assert!(!StudentRepo::move_to_class(&pool, student.id, from.id, to.id).await.unwrap());

    let moved = StudentRepo::find_by_id(&pool, student.id).await.unwrap().unwrap();
    assert_eq!(moved.class_id, Some(to.id));
    assert_eq!(moved.roll_number, 0);

    assert!(AcademicYearRepo::mark_promoted(&pool, year.id).await.unwrap());
    assert!(!AcademicYearRepo::mark_promoted(&pool, year.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

async fn due_fee(pool: &PgPool, amount: f64) -> Fee {
    let year = current_year(pool).await;
    let class = class(pool, "5A").await;
    let student = enroll(pool, year.id, &new_student("Meena", class.id, None)).await;
    let fee_type = FeeRepo::create_type(
        pool,
        &CreateFeeType {
            name: "Tuition".into(),
            code: "TUI".into(),
            amount,
            description: None,
            is_recurring: false,
            recurrence: None,
        },
    )
    .await
    .unwrap();

    let fee = FeeRepo::create(pool, None, student.id, year.id, fee_type.id, amount, date(2026, 1, 10))
        .await
        .unwrap();
    assert_eq!(fee.state, "draft");
    assert_eq!(fee.paid_amount, 0.0);
    FeeRepo::set_state(pool, fee.id, "draft", "due").await.unwrap().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn payments_accumulate_until_the_fee_is_paid(pool: PgPool) {
    let fee = due_fee(&pool, 1000.3).await;

    let first = apply_payment(FeeState::Due, fee.amount, fee.paid_amount, 1000.1).unwrap();
    assert_eq!(first.state, FeeState::Partial);
    let partial = FeeRepo::record_payment(
        &pool,
        fee.id,
        "due",
        fee.paid_amount,
        first.paid_amount,
        first.state.as_str(),
        "cash",
        date(2026, 1, 5),
    )
    .await
    .unwrap()
    .expect("payment against the current row should apply");
    assert_eq!(partial.state, "partial");
    assert_eq!(partial.paid_amount, 1000.1);
    assert_eq!(partial.payment_method.as_deref(), Some("cash"));

    // A payment computed against the old paid amount is refused.
    assert!(FeeRepo::record_payment(
        &pool,
        fee.id,
        "due",
        fee.paid_amount,
        first.paid_amount,
        "partial",
        "cash",
        date(2026, 1, 5),
    )
    .await
    .unwrap()
    .is_none());

    let rest = apply_payment(FeeState::Partial, partial.amount, partial.paid_amount, 0.2).unwrap();
    assert_eq!(rest.state, FeeState::Paid);
    let paid = FeeRepo::record_payment(
        &pool,
        fee.id,
        "partial",
        partial.paid_amount,
        rest.paid_amount,
        rest.state.as_str(),
        "online",
        date(2026, 1, 8),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(paid.state, "paid");
    assert_eq!(paid.paid_amount, paid.amount);
    assert_eq!(paid.payment_date, Some(date(2026, 1, 8)));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn mark_paid_settles_the_full_amount_once(pool: PgPool) {
    let fee = due_fee(&pool, 250.0).await;

    let paid = FeeRepo::mark_paid(&pool, fee.id, "due", date(2026, 1, 9))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(paid.state, "paid");
    assert_eq!(paid.paid_amount, 250.0);
    assert_eq!(paid.payment_date, Some(date(2026, 1, 9)));

    assert!(FeeRepo::mark_paid(&pool, fee.id, "due", date(2026, 1, 9))
        .await
        .unwrap()
        .is_none());
    assert!(!FeeRepo::delete_draft(&pool, fee.id).await.unwrap());
}
