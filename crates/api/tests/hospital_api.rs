//! Hospital endpoints against a migrated database.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_as, post_as, token};
use regsuite_core::acl::{ROLE_ADMIN, ROLE_NURSE, ROLE_RECEPTIONIST};
use serde_json::json;
use sqlx::PgPool;

async fn post_created(pool: &PgPool, uri: &str, role: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_as(common::build_test_app(pool.clone()), uri, &token(2, role), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn patient_registration_assigns_id(pool: PgPool) {
    let patient = post_created(
        &pool,
        "/api/v1/patients",
        ROLE_RECEPTIONIST,
        json!({ "name": "Asha Rao", "contact_number": "9876543210" }),
    )
    .await;

    assert_eq!(patient["patient_id"], "PAT0001");
    assert_eq!(patient["contact_number"], "9876543210");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn duplicate_contact_number_is_conflict(pool: PgPool) {
    post_created(
        &pool,
        "/api/v1/patients",
        ROLE_RECEPTIONIST,
        json!({ "name": "Asha Rao", "contact_number": "9876543210" }),
    )
    .await;

    let response = post_as(
        common::build_test_app(pool),
        "/api/v1/patients",
        &token(2, ROLE_RECEPTIONIST),
        json!({ "name": "Someone Else", "contact_number": "9876543210" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "A patient with contact number 9876543210 already exists: Asha Rao."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn non_numeric_contact_is_rejected(pool: PgPool) {
    let response = post_as(
        common::build_test_app(pool),
        "/api/v1/patients",
        &token(2, ROLE_RECEPTIONIST),
        json!({ "name": "Asha Rao", "contact_number": "98-765" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn booked_bed_cannot_be_deleted_until_released(pool: PgPool) {
    let patient = post_created(
        &pool,
        "/api/v1/patients",
        ROLE_RECEPTIONIST,
        json!({ "name": "Ravi Kumar" }),
    )
    .await;
    let bed = post_created(&pool, "/api/v1/icu-beds", ROLE_ADMIN, json!({ "name": "ICU-1" })).await;
    let bed_id = bed["id"].as_i64().unwrap();
    assert_eq!(bed["status"], "available");
    assert_eq!(bed["is_available"], true);

    let nurse = token(4, ROLE_NURSE);
    let admin = token(1, ROLE_ADMIN);

    let response = post_as(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/icu-beds/{bed_id}/assign"),
        &nurse,
        json!({ "patient_id": patient["id"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "booked");
    assert_eq!(json["data"]["patient_id"], patient["id"]);

    let response = delete_as(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/icu-beds/{bed_id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_as(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/icu-beds/{bed_id}/release"),
        &nurse,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "available");

    let response = delete_as(
        common::build_test_app(pool),
        &format!("/api/v1/icu-beds/{bed_id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn bed_names_are_unique(pool: PgPool) {
    post_created(&pool, "/api/v1/icu-beds", ROLE_ADMIN, json!({ "name": "ICU-1" })).await;

    let response = post_as(
        common::build_test_app(pool),
        "/api/v1/icu-beds",
        &token(1, ROLE_ADMIN),
        json!({ "name": "ICU-1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}
