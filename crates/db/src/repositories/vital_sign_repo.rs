//! Repository for the `vital_signs` table.

use regsuite_core::types::DbId;
use sqlx::PgPool;

use crate::models::vital_sign::{CreateVitalSign, VitalSign};

const COLUMNS: &str = "\
    id, patient_id, date, temperature, pulse, respiration_rate, blood_pressure, \
    created_at, updated_at";

pub struct VitalSignRepo;

impl VitalSignRepo {
    pub async fn create(pool: &PgPool, input: &CreateVitalSign) -> Result<VitalSign, sqlx::Error> {
        let query = format!(
            "INSERT INTO vital_signs \
                (patient_id, date, temperature, pulse, respiration_rate, blood_pressure) \
             VALUES ($1, COALESCE($2, CURRENT_DATE), $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VitalSign>(&query)
            .bind(input.patient_id)
            .bind(input.date)
            .bind(input.temperature)
            .bind(input.pulse)
            .bind(input.respiration_rate)
            .bind(&input.blood_pressure)
            .fetch_one(pool)
            .await
    }

    /// Readings for a patient, latest first.
    pub async fn list_for_patient(
        pool: &PgPool,
        patient_id: DbId,
    ) -> Result<Vec<VitalSign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vital_signs WHERE patient_id = $1 ORDER BY date DESC, id DESC"
        );
        sqlx::query_as::<_, VitalSign>(&query)
            .bind(patient_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vital_signs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
