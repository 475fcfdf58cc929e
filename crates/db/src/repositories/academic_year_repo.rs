//! Repository for the `academic_years` table.

use regsuite_core::types::DbId;
use sqlx::PgPool;

use crate::models::academic_year::{AcademicYear, CreateAcademicYear, UpdateAcademicYear};

const COLUMNS: &str = "id, name, start_date, end_date, is_current, promoted, created_at, updated_at";

pub struct AcademicYearRepo;

impl AcademicYearRepo {
    /// Create a year. Creating it as current clears the flag on every other
    /// year in the same transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAcademicYear,
    ) -> Result<AcademicYear, sqlx::Error> {
        let mut tx = pool.begin().await?;
        if input.is_current {
            sqlx::query("UPDATE academic_years SET is_current = false WHERE is_current")
                .execute(&mut *tx)
                .await?;
        }
        let query = format!(
            "INSERT INTO academic_years (name, start_date, end_date, is_current) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let year = sqlx::query_as::<_, AcademicYear>(&query)
            .bind(&input.name)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.is_current)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(year)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AcademicYear>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM academic_years WHERE id = $1");
        sqlx::query_as::<_, AcademicYear>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The year flagged as current, if any.
    pub async fn find_current(pool: &PgPool) -> Result<Option<AcademicYear>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM academic_years WHERE is_current LIMIT 1");
        sqlx::query_as::<_, AcademicYear>(&query)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<AcademicYear>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM academic_years ORDER BY start_date DESC");
        sqlx::query_as::<_, AcademicYear>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAcademicYear,
    ) -> Result<Option<AcademicYear>, sqlx::Error> {
        let query = format!(
            "UPDATE academic_years SET
                name = COALESCE($2, name),
                start_date = COALESCE($3, start_date),
                end_date = COALESCE($4, end_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AcademicYear>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Make `id` the only current year.
    pub async fn set_current(pool: &PgPool, id: DbId) -> Result<Option<AcademicYear>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("UPDATE academic_years SET is_current = false WHERE is_current AND id <> $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let query = format!(
            "UPDATE academic_years SET is_current = true WHERE id = $1 RETURNING {COLUMNS}"
        );
        let year = sqlx::query_as::<_, AcademicYear>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if year.is_some() {
            tx.commit().await?;
        }
        Ok(year)
    }

    /// Record that promotion ran for a year.
    ///
    /// Returns `false` if it was already recorded.
    pub async fn mark_promoted(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE academic_years SET promoted = true WHERE id = $1 AND NOT promoted")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
