//! Operator registry: expiring licenses and UAF invoicing.

use chrono::NaiveDate;
use regsuite_core::operator::InvoiceWindow;
use regsuite_core::types::DbId;
use regsuite_db::models::license::{CreateLicense, License};
use regsuite_db::models::operator::{CreateOperator, Operator};
use regsuite_db::models::uaf::{CreateUafDeclaration, UafDeclaration};
use regsuite_db::repositories::{LicenseRepo, OperatorRepo, UafRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn operator(pool: &PgPool, code: &str) -> Operator {
    OperatorRepo::create(
        pool,
        code,
        "admin",
        &CreateOperator {
            partner_name: Some(format!("Partner {code}")),
            operator_code: None,
            operator_type: "isp".into(),
            legal_name: None,
            trading_name: None,
            tin: None,
            registration_no: None,
            is_uaf_contributor: Some(true),
            uaf_rate: Some(0.015),
        },
    )
    .await
    .unwrap()
}

/// A declaration for `[start, end]` already moved to `verified`.
async fn verified(
    pool: &PgPool,
    operator_id: DbId,
    start: NaiveDate,
    end: NaiveDate,
) -> UafDeclaration {
    let draft = UafRepo::create(
        pool,
        &CreateUafDeclaration {
            operator_id,
            period_start: start,
            period_end: end,
            declared_amount: Some(1200.0),
            currency: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    UafRepo::set_state(pool, draft.id, "draft", "verified")
        .await
        .unwrap()
        .unwrap()
}

async fn issue(
    pool: &PgPool,
    operator_id: DbId,
    number: &str,
    expiry: Option<NaiveDate>,
) -> License {
    let input = CreateLicense {
        operator_id,
        license_number: Some(number.into()),
        license_type: "spectrum".into(),
        issue_date: Some(date(2021, 1, 1)),
        expiry_date: expiry,
        fee_amount: None,
        currency: None,
        conditions: None,
    };
    LicenseRepo::create(pool, number, "admin", &input).await.unwrap()
}

/// Sorted, since `UPDATE .. RETURNING` has no defined order.
fn ids(declarations: &[UafDeclaration]) -> Vec<DbId> {
    let mut ids: Vec<DbId> = declarations.iter().map(|d| d.id).collect();
    ids.sort_unstable();
    ids
}

// ---------------------------------------------------------------------------
// Licenses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn only_active_licenses_before_the_cutoff_are_expiring(pool: PgPool) {
    let op = operator(&pool, "OP0001").await;
    let soon = issue(&pool, op.id, "LIC00001", Some(date(2026, 5, 1))).await;
    issue(&pool, op.id, "LIC00002", Some(date(2027, 5, 1))).await;
    issue(&pool, op.id, "LIC00003", None).await;
    let revoked = issue(&pool, op.id, "LIC00004", Some(date(2026, 4, 20))).await;
    LicenseRepo::set_status(&pool, revoked.id, "active", "revoked")
        .await
        .unwrap()
        .unwrap();

    let expiring = LicenseRepo::list_expiring_before(&pool, date(2026, 7, 1)).await.unwrap();
    assert_eq!(expiring.len(), 1);
    assert_eq!(expiring[0].id, soon.id);
    assert_eq!(expiring[0].operator_code, "OP0001");
    assert_eq!(expiring[0].partner_name.as_deref(), Some("Partner OP0001"));
}

// ---------------------------------------------------------------------------
// UAF invoicing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn invoicing_takes_verified_declarations_inside_the_window(pool: PgPool) {
    let op = operator(&pool, "OP0001").await;

    let january = verified(&pool, op.id, date(2026, 1, 1), date(2026, 1, 31)).await;
    let february = verified(&pool, op.id, date(2026, 2, 1), date(2026, 2, 28)).await;
    // Straddles the window start.
    let straddling = verified(&pool, op.id, date(2025, 12, 15), date(2026, 1, 15)).await;
    let draft = UafRepo::create(
        &pool,
        &CreateUafDeclaration {
            operator_id: op.id,
            period_start: date(2026, 3, 1),
            period_end: date(2026, 3, 31),
            declared_amount: None,
            currency: None,
            notes: None,
        },
    )
    .await
    .unwrap();

    let window = InvoiceWindow::new(date(2026, 1, 1), date(2026, 3, 31), vec![]).unwrap();
    let invoiced = UafRepo::invoice_verified(&pool, &window).await.unwrap();
    assert_eq!(ids(&invoiced), vec![january.id, february.id]);
    assert!(invoiced.iter().all(|d| d.state == "invoiced" && d.invoiced_at.is_some()));

    let untouched = UafRepo::find_by_id(&pool, straddling.id).await.unwrap().unwrap();
    assert_eq!(untouched.state, "verified");
    let untouched = UafRepo::find_by_id(&pool, draft.id).await.unwrap().unwrap();
    assert_eq!(untouched.state, "draft");

    // A second run has nothing left to invoice.
    assert!(UafRepo::invoice_verified(&pool, &window).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn invoicing_can_be_limited_to_selected_operators(pool: PgPool) {
    let chosen = operator(&pool, "OP0001").await;
    let other = operator(&pool, "OP0002").await;

    let selected = verified(&pool, chosen.id, date(2026, 1, 1), date(2026, 1, 31)).await;
    let skipped = verified(&pool, other.id, date(2026, 1, 1), date(2026, 1, 31)).await;

    let window =
        InvoiceWindow::new(date(2026, 1, 1), date(2026, 1, 31), vec![chosen.id]).unwrap();
    let invoiced = UafRepo::invoice_verified(&pool, &window).await.unwrap();
    assert_eq!(ids(&invoiced), vec![selected.id]);

    let left = UafRepo::find_by_id(&pool, skipped.id).await.unwrap().unwrap();
    assert_eq!(left.state, "verified");
    assert!(left.invoiced_at.is_none());
}
