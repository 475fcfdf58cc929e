//! Counter behaviour of `SequenceRepo`.

use regsuite_core::sequence;
use regsuite_db::repositories::SequenceRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn identifiers_are_strictly_increasing(pool: PgPool) {
    let mut issued = Vec::new();
    for _ in 0..5 {
        issued.push(
            SequenceRepo::next_by_code(&pool, sequence::PATIENT.code)
                .await
                .unwrap(),
        );
    }

    assert_eq!(issued[0], "PAT0001");
    for pair in issued.windows(2) {
        assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn missing_well_known_counter_is_recreated(pool: PgPool) {
    sqlx::query("DELETE FROM sequences WHERE code = $1")
        .bind(sequence::FEE.code)
        .execute(&pool)
        .await
        .unwrap();

    let first = SequenceRepo::next_by_code(&pool, sequence::FEE.code).await.unwrap();
    let second = SequenceRepo::next_by_code(&pool, sequence::FEE.code).await.unwrap();

    assert_eq!(first, "FEE00001");
    assert_eq!(second, "FEE00002");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn unknown_counter_is_not_found(pool: PgPool) {
    let result = SequenceRepo::next_by_code(&pool, "no.such.counter").await;
    assert!(matches!(result, Err(sqlx::Error::RowNotFound)));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn supplied_identifier_is_kept(pool: PgPool) {
    let kept = SequenceRepo::assign(&pool, &sequence::STUDENT, Some("STU-LEGACY-7"))
        .await
        .unwrap();
    assert_eq!(kept, "STU-LEGACY-7");

    let drawn = SequenceRepo::assign(&pool, &sequence::STUDENT, Some("New"))
        .await
        .unwrap();
    assert_eq!(drawn, "STU00001");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn concurrent_draws_never_collide(pool: PgPool) {
    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            SequenceRepo::next_by_code(&pool, sequence::APPOINTMENT.code)
                .await
                .unwrap()
        }));
    }

    let mut issued = Vec::new();
    for handle in handles {
        issued.push(handle.await.unwrap());
    }
    issued.sort();
    issued.dedup();
    assert_eq!(issued.len(), 8);
}
