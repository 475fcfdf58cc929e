//! Operator registry endpoints against a migrated database.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_as, post_as, token};
use regsuite_core::acl::{ROLE_REGULATORY_OFFICER, ROLE_UAF_OFFICER};
use serde_json::json;
use sqlx::PgPool;

async fn create_operator(pool: &PgPool, body: serde_json::Value) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_as(
        app,
        "/api/v1/operators",
        &token(5, ROLE_REGULATORY_OFFICER),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn new_operator_draws_code_and_starts_pending(pool: PgPool) {
    let first = create_operator(
        &pool,
        json!({ "partner_name": "Digicel", "operator_type": "mno" }),
    )
    .await;
    let second = create_operator(&pool, json!({ "operator_type": "isp" })).await;

    assert_eq!(first["operator_code"], "OP0001");
    assert_eq!(first["status"], "pending");
    assert_eq!(first["display_name"], "Digicel [OP0001]");
    assert_eq!(second["operator_code"], "OP0002");
    assert_eq!(second["display_name"], "OP0002 [OP0002]");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn unknown_operator_type_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_as(
        app,
        "/api/v1/operators",
        &token(5, ROLE_REGULATORY_OFFICER),
        json!({ "operator_type": "satellite-phone" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn status_follows_lifecycle(pool: PgPool) {
    let operator = create_operator(&pool, json!({ "operator_type": "fm" })).await;
    let id = operator["id"].as_i64().unwrap();
    let officer = token(5, ROLE_REGULATORY_OFFICER);
    let uri = format!("/api/v1/operators/{id}/status");

    let response = post_as(
        common::build_test_app(pool.clone()),
        &uri,
        &officer,
        json!({ "status": "active" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "active");

    let response = post_as(
        common::build_test_app(pool.clone()),
        &uri,
        &officer,
        json!({ "status": "pending" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "INVALID_TRANSITION");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn uaf_officer_reads_but_cannot_create(pool: PgPool) {
    create_operator(&pool, json!({ "operator_type": "tv" })).await;
    let uaf = token(9, ROLE_UAF_OFFICER);

    let response = get_as(common::build_test_app(pool.clone()), "/api/v1/operators", &uaf).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = post_as(
        common::build_test_app(pool),
        "/api/v1/operators",
        &uaf,
        json!({ "operator_type": "vsat" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn missing_operator_is_not_found(pool: PgPool) {
    let response = get_as(
        common::build_test_app(pool),
        "/api/v1/operators/999999",
        &token(5, ROLE_REGULATORY_OFFICER),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Operator with id 999999 not found"
    );
}
