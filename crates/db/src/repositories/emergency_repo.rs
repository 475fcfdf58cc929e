//! Repository for the `emergency_cases` table.

use regsuite_core::sequence;
use regsuite_core::types::DbId;
use sqlx::PgPool;

use crate::models::emergency::{
    CreateEmergencyCase, EmergencyCase, EmergencyListParams, UpdateEmergencyCase,
};
use crate::repositories::SequenceRepo;

const COLUMNS: &str = "\
    id, reference, patient_id, triage_level, chief_complaint, vital_signs, \
    initial_assessment, treatment_given, assigned_doctor_id, nurse_name, arrival_time, \
    treatment_start_time, discharge_time, state, created_at, updated_at";

pub struct EmergencyRepo;

impl EmergencyRepo {
    /// Register an arrival.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEmergencyCase,
    ) -> Result<EmergencyCase, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let reference =
            SequenceRepo::assign(&mut *tx, &sequence::EMERGENCY, input.reference.as_deref())
                .await?;

        let query = format!(
            "INSERT INTO emergency_cases \
                (reference, patient_id, triage_level, chief_complaint, vital_signs, \
                 initial_assessment, assigned_doctor_id, nurse_name) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let case = sqlx::query_as::<_, EmergencyCase>(&query)
            .bind(&reference)
            .bind(input.patient_id)
            .bind(&input.triage_level)
            .bind(&input.chief_complaint)
            .bind(&input.vital_signs)
            .bind(&input.initial_assessment)
            .bind(input.assigned_doctor_id)
            .bind(&input.nurse_name)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(case)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<EmergencyCase>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM emergency_cases WHERE id = $1");
        sqlx::query_as::<_, EmergencyCase>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List cases, most recent arrival first.
    pub async fn list(
        pool: &PgPool,
        params: &EmergencyListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EmergencyCase>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if params.state.is_some() {
            conditions.push(format!("state = ${param_idx}"));
            param_idx += 1;
        }
        if params.triage_level.is_some() {
            conditions.push(format!("triage_level = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM emergency_cases {where_clause} \
             ORDER BY arrival_time DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, EmergencyCase>(&query);
        if let Some(ref s) = params.state {
            q = q.bind(s);
        }
        if let Some(ref t) = params.triage_level {
            q = q.bind(t);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmergencyCase,
    ) -> Result<Option<EmergencyCase>, sqlx::Error> {
        let query = format!(
            "UPDATE emergency_cases SET
                triage_level = COALESCE($2, triage_level),
                vital_signs = COALESCE($3, vital_signs),
                initial_assessment = COALESCE($4, initial_assessment),
                treatment_given = COALESCE($5, treatment_given),
                assigned_doctor_id = COALESCE($6, assigned_doctor_id),
                nurse_name = COALESCE($7, nurse_name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmergencyCase>(&query)
            .bind(id)
            .bind(&input.triage_level)
            .bind(&input.vital_signs)
            .bind(&input.initial_assessment)
            .bind(&input.treatment_given)
            .bind(input.assigned_doctor_id)
            .bind(&input.nurse_name)
            .fetch_optional(pool)
            .await
    }

    /// Move a case from `from` to `to`.
    ///
    /// Entering treatment stamps `treatment_start_time` (first time only);
    /// discharge stamps `discharge_time`. Returns `None` if the case is no
    /// longer in `from`.
    pub async fn set_state(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<EmergencyCase>, sqlx::Error> {
        let query = format!(
            "UPDATE emergency_cases SET
                state = $3,
                treatment_start_time = CASE WHEN $3 = 'in_treatment'
                    THEN COALESCE(treatment_start_time, NOW()) ELSE treatment_start_time END,
                discharge_time = CASE WHEN $3 = 'discharged'
                    THEN NOW() ELSE discharge_time END
             WHERE id = $1 AND state = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmergencyCase>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }
}
