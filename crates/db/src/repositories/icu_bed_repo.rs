//! Repository for the `icu_beds` table.

use regsuite_core::types::DbId;
use sqlx::PgPool;

use crate::models::icu_bed::{CreateIcuBed, IcuBed, UpdateIcuBed};

const COLUMNS: &str = "id, name, status, patient_id, assigned_date, notes, created_at, updated_at";

pub struct IcuBedRepo;

impl IcuBedRepo {
    pub async fn create(pool: &PgPool, input: &CreateIcuBed) -> Result<IcuBed, sqlx::Error> {
        let query =
            format!("INSERT INTO icu_beds (name, notes) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, IcuBed>(&query)
            .bind(input.name.trim())
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<IcuBed>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM icu_beds WHERE id = $1");
        sqlx::query_as::<_, IcuBed>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<IcuBed>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM icu_beds WHERE name = $1");
        sqlx::query_as::<_, IcuBed>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List beds by name, optionally only those with `status`.
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<IcuBed>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM icu_beds WHERE ($1::TEXT IS NULL OR status = $1) ORDER BY name"
        );
        sqlx::query_as::<_, IcuBed>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIcuBed,
    ) -> Result<Option<IcuBed>, sqlx::Error> {
        let query = format!(
            "UPDATE icu_beds SET
                name = COALESCE($2, name),
                notes = COALESCE($3, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IcuBed>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Book an available bed for a patient; `None` if it is not available.
    pub async fn assign(
        pool: &PgPool,
        id: DbId,
        patient_id: DbId,
    ) -> Result<Option<IcuBed>, sqlx::Error> {
        let query = format!(
            "UPDATE icu_beds SET status = 'booked', patient_id = $2, assigned_date = NOW() \
             WHERE id = $1 AND status = 'available' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IcuBed>(&query)
            .bind(id)
            .bind(patient_id)
            .fetch_optional(pool)
            .await
    }

    /// Free a booked bed; `None` if it is not booked.
    pub async fn release(pool: &PgPool, id: DbId) -> Result<Option<IcuBed>, sqlx::Error> {
        let query = format!(
            "UPDATE icu_beds SET status = 'available', patient_id = NULL, assigned_date = NULL \
             WHERE id = $1 AND status = 'booked' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IcuBed>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Switch between `available` and `maintenance`.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<IcuBed>, sqlx::Error> {
        let query = format!(
            "UPDATE icu_beds SET status = $3 WHERE id = $1 AND status = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IcuBed>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Delete a bed that is not booked.
    ///
    /// Returns `false` if the row is missing or was booked in the meantime.
    pub async fn delete_unbooked(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM icu_beds WHERE id = $1 AND status <> 'booked'")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
