//! Repository for the `patients` table.

use regsuite_core::sequence;
use regsuite_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::patient::{CreatePatient, Patient, PatientListParams, UpdatePatient};
use crate::repositories::SequenceRepo;

/// Column list for `patients` queries.
const COLUMNS: &str = "\
    id, patient_id, name, date_of_birth, registration_date, gender, blood_group, \
    marital_status, contact_number, email, address, emergency_contact, emergency_phone, \
    medical_history, allergies, insurance_id, insurance_provider, case_description, \
    state, status, created_at, updated_at";

/// Result of a guarded patient registration.
#[derive(Debug)]
pub enum PatientInsert {
    Created(Patient),
    /// Another patient already holds the contact number; nothing was written.
    DuplicateContact(Patient),
}

/// Provides CRUD operations and state changes for patients.
pub struct PatientRepo;

impl PatientRepo {
    /// Register a patient.
    ///
    /// The duplicate-contact check, the identifier draw and the insert run in
    /// one transaction; a duplicate rolls everything back.
    pub async fn create(pool: &PgPool, input: &CreatePatient) -> Result<PatientInsert, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(contact) = input.contact_number.as_deref() {
            if let Some(existing) = Self::find_by_contact(&mut *tx, contact).await? {
                return Ok(PatientInsert::DuplicateContact(existing));
            }
        }

        let patient_id =
            SequenceRepo::assign(&mut *tx, &sequence::PATIENT, input.patient_id.as_deref()).await?;

        let query = format!(
            "INSERT INTO patients \
                (patient_id, name, date_of_birth, registration_date, gender, blood_group, \
                 marital_status, contact_number, email, address, emergency_contact, \
                 emergency_phone, medical_history, allergies, insurance_id, \
                 insurance_provider, case_description) \
             VALUES ($1, $2, $3, COALESCE($4, NOW()), $5, $6, $7, $8, $9, $10, $11, $12, \
                     $13, $14, $15, $16, $17) \
             RETURNING {COLUMNS}"
        );
        let patient = sqlx::query_as::<_, Patient>(&query)
            .bind(&patient_id)
            .bind(&input.name)
            .bind(input.date_of_birth)
            .bind(input.registration_date)
            .bind(&input.gender)
            .bind(&input.blood_group)
            .bind(&input.marital_status)
            .bind(&input.contact_number)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.emergency_contact)
            .bind(&input.emergency_phone)
            .bind(&input.medical_history)
            .bind(&input.allergies)
            .bind(&input.insurance_id)
            .bind(&input.insurance_provider)
            .bind(&input.case_description)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(PatientInsert::Created(patient))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE id = $1");
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the patient holding a contact number.
    pub async fn find_by_contact<'e, E>(
        executor: E,
        contact_number: &str,
    ) -> Result<Option<Patient>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE contact_number = $1");
        sqlx::query_as::<_, Patient>(&query)
            .bind(contact_number)
            .fetch_optional(executor)
            .await
    }

    /// List patients, most recently registered first.
    pub async fn list(
        pool: &PgPool,
        params: &PatientListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Patient>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if params.state.is_some() {
            conditions.push(format!("state = ${param_idx}"));
            param_idx += 1;
        }
        if params.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if params.search.is_some() {
            conditions.push(format!(
                "(name ILIKE ${param_idx} OR patient_id ILIKE ${param_idx} \
                 OR contact_number ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM patients {where_clause} \
             ORDER BY registration_date DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Patient>(&query);
        if let Some(ref s) = params.state {
            q = q.bind(s);
        }
        if let Some(ref s) = params.status {
            q = q.bind(s);
        }
        if let Some(ref s) = params.search {
            q = q.bind(format!("%{s}%"));
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePatient,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!(
            "UPDATE patients SET
                name = COALESCE($2, name),
                date_of_birth = COALESCE($3, date_of_birth),
                gender = COALESCE($4, gender),
                blood_group = COALESCE($5, blood_group),
                marital_status = COALESCE($6, marital_status),
                contact_number = COALESCE($7, contact_number),
                email = COALESCE($8, email),
                address = COALESCE($9, address),
                emergency_contact = COALESCE($10, emergency_contact),
                emergency_phone = COALESCE($11, emergency_phone),
                medical_history = COALESCE($12, medical_history),
                allergies = COALESCE($13, allergies),
                insurance_id = COALESCE($14, insurance_id),
                insurance_provider = COALESCE($15, insurance_provider),
                case_description = COALESCE($16, case_description),
                status = COALESCE($17, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(&input.blood_group)
            .bind(&input.marital_status)
            .bind(&input.contact_number)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.emergency_contact)
            .bind(&input.emergency_phone)
            .bind(&input.medical_history)
            .bind(&input.allergies)
            .bind(&input.insurance_id)
            .bind(&input.insurance_provider)
            .bind(&input.case_description)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Move a patient from `from` to `to`; `None` if it is no longer in `from`.
    pub async fn set_state(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!(
            "UPDATE patients SET state = $3 WHERE id = $1 AND state = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
