//! Repository for medicines and dose units.

use regsuite_core::types::DbId;
use sqlx::PgPool;

use crate::models::medicine::{CreateDoseUnit, CreateMedicine, DoseUnit, Medicine, UpdateMedicine};

const COLUMNS: &str = "id, name, qty_available, unit, created_at, updated_at";

const DOSE_UNIT_COLUMNS: &str = "id, name, description, created_at, updated_at";

pub struct MedicineRepo;

impl MedicineRepo {
    pub async fn create(pool: &PgPool, input: &CreateMedicine) -> Result<Medicine, sqlx::Error> {
        let query = format!(
            "INSERT INTO medicines (name, qty_available, unit) VALUES ($1, COALESCE($2, 0), $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Medicine>(&query)
            .bind(&input.name)
            .bind(input.qty_available)
            .bind(&input.unit)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Medicine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM medicines WHERE id = $1");
        sqlx::query_as::<_, Medicine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Medicine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM medicines ORDER BY name LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Medicine>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMedicine,
    ) -> Result<Option<Medicine>, sqlx::Error> {
        let query = format!(
            "UPDATE medicines SET
                name = COALESCE($2, name),
                qty_available = COALESCE($3, qty_available),
                unit = COALESCE($4, unit)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Medicine>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.qty_available)
            .bind(&input.unit)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM medicines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Dose units
    // -----------------------------------------------------------------------

    pub async fn create_dose_unit(
        pool: &PgPool,
        input: &CreateDoseUnit,
    ) -> Result<DoseUnit, sqlx::Error> {
        let query = format!(
            "INSERT INTO dose_units (name, description) VALUES ($1, $2) \
             RETURNING {DOSE_UNIT_COLUMNS}"
        );
        sqlx::query_as::<_, DoseUnit>(&query)
            .bind(input.name.trim())
            .bind(input.description.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn list_dose_units(pool: &PgPool) -> Result<Vec<DoseUnit>, sqlx::Error> {
        let query = format!("SELECT {DOSE_UNIT_COLUMNS} FROM dose_units ORDER BY name");
        sqlx::query_as::<_, DoseUnit>(&query).fetch_all(pool).await
    }

    pub async fn delete_dose_unit(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dose_units WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
