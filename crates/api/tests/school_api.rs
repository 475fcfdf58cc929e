//! School endpoints against a migrated database.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_as, post_as, token};
use regsuite_core::acl::{ROLE_ADMIN, ROLE_TEACHER};
use serde_json::json;
use sqlx::PgPool;

async fn post_created(pool: &PgPool, uri: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_as(
        common::build_test_app(pool.clone()),
        uri,
        &token(1, ROLE_ADMIN),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

async fn current_year(pool: &PgPool) -> serde_json::Value {
    post_created(
        pool,
        "/api/v1/academic-years",
        json!({
            "name": "2026-2027",
            "start_date": "2026-04-01",
            "end_date": "2027-03-31",
            "is_current": true,
        }),
    )
    .await
}

fn student(first_name: &str, class_id: &serde_json::Value) -> serde_json::Value {
    json!({
        "first_name": first_name,
        "last_name": "Sharma",
        "date_of_birth": "2015-06-15",
        "gender": "female",
        "class_id": class_id,
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn students_get_sequential_roll_numbers(pool: PgPool) {
    current_year(&pool).await;
    let class = post_created(
        &pool,
        "/api/v1/classes",
        json!({ "name": "Grade 5", "code": "G5" }),
    )
    .await;

    let first = post_created(&pool, "/api/v1/students", student("Meera", &class["id"])).await;
    let second = post_created(&pool, "/api/v1/students", student("Anil", &class["id"])).await;

    assert_eq!(first["student_id"], "STU00001");
    assert_eq!(first["roll_number"], 1);
    assert_eq!(first["display_name"], "Meera Sharma");
    assert_eq!(second["student_id"], "STU00002");
    assert_eq!(second["roll_number"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn full_class_rejects_registration(pool: PgPool) {
    current_year(&pool).await;
    let class = post_created(
        &pool,
        "/api/v1/classes",
        json!({ "name": "Grade 1", "code": "G1", "capacity": 1 }),
    )
    .await;
    post_created(&pool, "/api/v1/students", student("Meera", &class["id"])).await;

    let response = post_as(
        common::build_test_app(pool),
        "/api/v1/students",
        &token(1, ROLE_ADMIN),
        student("Anil", &class["id"]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn registration_without_current_year_is_rejected(pool: PgPool) {
    let response = post_as(
        common::build_test_app(pool),
        "/api/v1/students",
        &token(1, ROLE_ADMIN),
        student("Meera", &serde_json::Value::Null),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn inverted_academic_year_is_rejected(pool: PgPool) {
    let response = post_as(
        common::build_test_app(pool),
        "/api/v1/academic-years",
        &token(1, ROLE_ADMIN),
        json!({ "name": "bad", "start_date": "2027-03-31", "end_date": "2026-04-01" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn teacher_reads_but_cannot_register_students(pool: PgPool) {
    current_year(&pool).await;
    let teacher = token(7, ROLE_TEACHER);

    let response = get_as(common::build_test_app(pool.clone()), "/api/v1/students", &teacher).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_as(
        common::build_test_app(pool),
        "/api/v1/students",
        &teacher,
        student("Meera", &serde_json::Value::Null),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
