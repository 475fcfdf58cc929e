//! Repository for prescriptions and their lines.

use regsuite_core::error::CoreError;
use regsuite_core::hospital::prescription::{self, StockLine};
use regsuite_core::sequence;
use regsuite_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::prescription::{
    CreatePrescription, LineStock, Prescription, PrescriptionLine, PrescriptionListParams,
    PrescriptionWithLines,
};
use crate::repositories::SequenceRepo;

const COLUMNS: &str = "\
    id, reference, patient_id, doctor_id, appointment_id, prescription_date, state, \
    notes, created_at, updated_at";

const LINE_COLUMNS: &str = "\
    id, prescription_id, medicine_id, quantity, dosage, duration, notes, \
    created_at, updated_at";

/// Result of a dispense attempt.
#[derive(Debug)]
pub enum DispenseOutcome {
    Dispensed(Prescription),
    /// The prescription was not in the confirmed state.
    NotConfirmed,
    /// Some line exceeds current stock; nothing was written.
    ShortStock(CoreError),
}

pub struct PrescriptionRepo;

impl PrescriptionRepo {
    /// Insert a prescription and its lines in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePrescription,
    ) -> Result<PrescriptionWithLines, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let reference =
            SequenceRepo::assign(&mut *tx, &sequence::PRESCRIPTION, input.reference.as_deref())
                .await?;

        let query = format!(
            "INSERT INTO prescriptions (reference, patient_id, doctor_id, appointment_id, notes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let prescription = sqlx::query_as::<_, Prescription>(&query)
            .bind(&reference)
            .bind(input.patient_id)
            .bind(input.doctor_id)
            .bind(input.appointment_id)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO prescription_lines \
                (prescription_id, medicine_id, quantity, dosage, duration, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {LINE_COLUMNS}"
        );
        let mut lines = Vec::with_capacity(input.lines.len());
        for line in &input.lines {
            let row = sqlx::query_as::<_, PrescriptionLine>(&query)
                .bind(prescription.id)
                .bind(line.medicine_id)
                .bind(line.quantity)
                .bind(&line.dosage)
                .bind(&line.duration)
                .bind(&line.notes)
                .fetch_one(&mut *tx)
                .await?;
            lines.push(row);
        }

        tx.commit().await?;
        Ok(PrescriptionWithLines {
            prescription,
            lines,
        })
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Prescription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prescriptions WHERE id = $1");
        sqlx::query_as::<_, Prescription>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_lines(
        pool: &PgPool,
        prescription_id: DbId,
    ) -> Result<Vec<PrescriptionLine>, sqlx::Error> {
        let query = format!(
            "SELECT {LINE_COLUMNS} FROM prescription_lines WHERE prescription_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, PrescriptionLine>(&query)
            .bind(prescription_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &PrescriptionListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Prescription>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if params.patient_id.is_some() {
            conditions.push(format!("patient_id = ${param_idx}"));
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
            "SELECT {COLUMNS} FROM prescriptions {where_clause} \
             ORDER BY prescription_date DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Prescription>(&query);
        if let Some(p) = params.patient_id {
            q = q.bind(p);
        }
        if let Some(ref s) = params.state {
            q = q.bind(s);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Required quantity per medicine for a prescription, next to the stock
    /// on hand. Lines for the same medicine are summed.
    pub async fn line_stock<'e, E>(
        executor: E,
        prescription_id: DbId,
    ) -> Result<Vec<LineStock>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, LineStock>(
            "SELECT m.id AS medicine_id, m.name AS medicine_name, m.qty_available, \
                    SUM(pl.quantity) AS quantity \
             FROM prescription_lines pl \
             JOIN medicines m ON m.id = pl.medicine_id \
             WHERE pl.prescription_id = $1 \
             GROUP BY m.id, m.name, m.qty_available \
             ORDER BY m.name",
        )
        .bind(prescription_id)
        .fetch_all(executor)
        .await
    }

    /// Move a prescription from `from` to `to`; `None` if it is no longer
    /// in `from`.
    pub async fn set_state(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<Prescription>, sqlx::Error> {
        let query = format!(
            "UPDATE prescriptions SET state = $3 WHERE id = $1 AND state = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prescription>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Dispense a confirmed prescription.
    ///
    /// The medicines involved are locked, stock is re-checked and then
    /// decremented, and the prescription moves to `dispensed`, all in one
    /// transaction.
    pub async fn dispense(pool: &PgPool, id: DbId) -> Result<DispenseOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE prescriptions SET state = 'dispensed' \
             WHERE id = $1 AND state = 'confirmed' \
             RETURNING {COLUMNS}"
        );
        let Some(prescription) = sqlx::query_as::<_, Prescription>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(DispenseOutcome::NotConfirmed);
        };

        sqlx::query(
            "SELECT id FROM medicines \
             WHERE id IN (SELECT medicine_id FROM prescription_lines WHERE prescription_id = $1) \
             ORDER BY id \
             FOR UPDATE",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let stock = Self::line_stock(&mut *tx, id).await?;
        let check: Vec<StockLine> = stock
            .iter()
            .map(|s| StockLine {
                medicine_name: s.medicine_name.clone(),
                available: s.qty_available,
                required: s.quantity,
            })
            .collect();
        if let Err(e) = prescription::check_stock(&check) {
            return Ok(DispenseOutcome::ShortStock(e));
        }

        for line in &stock {
            sqlx::query("UPDATE medicines SET qty_available = qty_available - $2 WHERE id = $1")
                .bind(line.medicine_id)
                .bind(line.quantity)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(DispenseOutcome::Dispensed(prescription))
    }

    /// Delete a draft or cancelled prescription.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM prescriptions WHERE id = $1 AND state IN ('draft', 'cancelled')",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
