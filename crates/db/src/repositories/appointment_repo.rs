//! Repository for the `appointments` and `medical_records` tables.

use regsuite_core::sequence;
use regsuite_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::appointment::{
    Appointment, AppointmentListParams, CreateAppointment, FollowUpCandidate, MedicalRecord,
    UpdateAppointment,
};
use crate::repositories::SequenceRepo;

/// Column list for `appointments` queries.
const COLUMNS: &str = "\
    id, reference, patient_id, doctor_id, appointment_date, duration, reason, \
    symptoms, diagnosis, notes, state, priority, created_at, updated_at";

const RECORD_COLUMNS: &str = "\
    id, patient_id, appointment_id, doctor_id, visit_date, symptoms, diagnosis, \
    notes, created_at, updated_at";

/// Provides CRUD, state changes and job queries for appointments.
pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Book an appointment, drawing a reference if none was supplied.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAppointment,
    ) -> Result<Appointment, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let reference =
            SequenceRepo::assign(&mut *tx, &sequence::APPOINTMENT, input.reference.as_deref())
                .await?;

        let query = format!(
            "INSERT INTO appointments \
                (reference, patient_id, doctor_id, appointment_date, duration, reason, \
                 symptoms, priority) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 0.5), $6, $7, COALESCE($8, 'normal')) \
             RETURNING {COLUMNS}"
        );
        let appointment = sqlx::query_as::<_, Appointment>(&query)
            .bind(&reference)
            .bind(input.patient_id)
            .bind(input.doctor_id)
            .bind(input.appointment_date)
            .bind(input.duration)
            .bind(&input.reason)
            .bind(&input.symptoms)
            .bind(&input.priority)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(appointment)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List appointments, latest first.
    pub async fn list(
        pool: &PgPool,
        params: &AppointmentListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if params.patient_id.is_some() {
            conditions.push(format!("patient_id = ${param_idx}"));
            param_idx += 1;
        }
        if params.doctor_id.is_some() {
            conditions.push(format!("doctor_id = ${param_idx}"));
            param_idx += 1;
        }
        if params.state.is_some() {
            conditions.push(format!("state = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM appointments {where_clause} \
             ORDER BY appointment_date DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Appointment>(&query);
        if let Some(p) = params.patient_id {
            q = q.bind(p);
        }
        if let Some(d) = params.doctor_id {
            q = q.bind(d);
        }
        if let Some(ref s) = params.state {
            q = q.bind(s);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAppointment,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET
                doctor_id = COALESCE($2, doctor_id),
                appointment_date = COALESCE($3, appointment_date),
                duration = COALESCE($4, duration),
                reason = COALESCE($5, reason),
                symptoms = COALESCE($6, symptoms),
                diagnosis = COALESCE($7, diagnosis),
                notes = COALESCE($8, notes),
                priority = COALESCE($9, priority)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(input.doctor_id)
            .bind(input.appointment_date)
            .bind(input.duration)
            .bind(&input.reason)
            .bind(&input.symptoms)
            .bind(&input.diagnosis)
            .bind(&input.notes)
            .bind(&input.priority)
            .fetch_optional(pool)
            .await
    }

    /// Move an appointment from `from` to `to`; `None` if it is no longer
    /// in `from`.
    pub async fn set_state(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET state = $3 WHERE id = $1 AND state = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Finish a consultation: the appointment moves to `done` and its
    /// medical record is written in the same transaction.
    ///
    /// Returns `None` if the appointment is no longer in consultation.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<(Appointment, MedicalRecord)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE appointments SET state = 'done' \
             WHERE id = $1 AND state = 'in_consultation' \
             RETURNING {COLUMNS}"
        );
        let Some(appointment) = sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let query = format!(
            "INSERT INTO medical_records \
                (patient_id, appointment_id, doctor_id, visit_date, symptoms, diagnosis, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {RECORD_COLUMNS}"
        );
        let record = sqlx::query_as::<_, MedicalRecord>(&query)
            .bind(appointment.patient_id)
            .bind(appointment.id)
            .bind(appointment.doctor_id)
            .bind(appointment.appointment_date)
            .bind(&appointment.symptoms)
            .bind(&appointment.diagnosis)
            .bind(&appointment.notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((appointment, record)))
    }

    pub async fn list_medical_records(
        pool: &PgPool,
        patient_id: DbId,
    ) -> Result<Vec<MedicalRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM medical_records WHERE patient_id = $1 \
             ORDER BY visit_date DESC"
        );
        sqlx::query_as::<_, MedicalRecord>(&query)
            .bind(patient_id)
            .fetch_all(pool)
            .await
    }

    /// Completed appointments of active patients that took place within
    /// `[from, to]`.
    pub async fn list_follow_up_candidates(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<FollowUpCandidate>, sqlx::Error> {
        sqlx::query_as::<_, FollowUpCandidate>(
            "SELECT a.id AS appointment_id, a.appointment_date, \
                    p.id AS patient_id, p.name AS patient_name, \
                    d.user_login AS doctor_login \
             FROM appointments a \
             JOIN patients p ON p.id = a.patient_id \
             JOIN doctors d ON d.id = a.doctor_id \
             WHERE a.state = 'done' \
               AND a.appointment_date >= $1 \
               AND a.appointment_date <= $2 \
               AND p.status = 'active' \
             ORDER BY a.appointment_date, a.id",
        )
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }
}
