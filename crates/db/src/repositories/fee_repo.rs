//! Repository for fee types and student fees.

use regsuite_core::sequence;
use regsuite_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::fee::{CreateFeeType, Fee, FeeListParams, FeeType, OverdueFee};
use crate::repositories::SequenceRepo;

const COLUMNS: &str = "\
    id, reference, student_id, academic_year_id, fee_type_id, amount, due_date, \
    payment_date, paid_amount, state, payment_method, created_at, updated_at";

const TYPE_COLUMNS: &str = "\
    id, name, code, amount, description, is_recurring, recurrence, created_at, updated_at";

pub struct FeeRepo;

impl FeeRepo {
    // -----------------------------------------------------------------------
    // Fee types
    // -----------------------------------------------------------------------

    pub async fn create_type(pool: &PgPool, input: &CreateFeeType) -> Result<FeeType, sqlx::Error> {
        let query = format!(
            "INSERT INTO fee_types (name, code, amount, description, is_recurring, recurrence) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {TYPE_COLUMNS}"
        );
        sqlx::query_as::<_, FeeType>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.amount)
            .bind(&input.description)
            .bind(input.is_recurring)
            .bind(&input.recurrence)
            .fetch_one(pool)
            .await
    }

    pub async fn find_type(pool: &PgPool, id: DbId) -> Result<Option<FeeType>, sqlx::Error> {
        let query = format!("SELECT {TYPE_COLUMNS} FROM fee_types WHERE id = $1");
        sqlx::query_as::<_, FeeType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_types(pool: &PgPool) -> Result<Vec<FeeType>, sqlx::Error> {
        let query = format!("SELECT {TYPE_COLUMNS} FROM fee_types ORDER BY code");
        sqlx::query_as::<_, FeeType>(&query).fetch_all(pool).await
    }

    // -----------------------------------------------------------------------
    // Fees
    // -----------------------------------------------------------------------

    /// Raise a fee with resolved amount and academic year.
    pub async fn create(
        pool: &PgPool,
        reference: Option<&str>,
        student_id: DbId,
        academic_year_id: DbId,
        fee_type_id: DbId,
        amount: f64,
        due_date: Date,
    ) -> Result<Fee, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let reference = SequenceRepo::assign(&mut *tx, &sequence::FEE, reference).await?;

        let query = format!(
            "INSERT INTO fees (reference, student_id, academic_year_id, fee_type_id, amount, due_date) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let fee = sqlx::query_as::<_, Fee>(&query)
            .bind(&reference)
            .bind(student_id)
            .bind(academic_year_id)
            .bind(fee_type_id)
            .bind(amount)
            .bind(due_date)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(fee)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Fee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fees WHERE id = $1");
        sqlx::query_as::<_, Fee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List fees by due date.
    pub async fn list(
        pool: &PgPool,
        params: &FeeListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Fee>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if params.student_id.is_some() {
            conditions.push(format!("student_id = ${param_idx}"));
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
            "SELECT {COLUMNS} FROM fees {where_clause} \
             ORDER BY due_date, id \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Fee>(&query);
        if let Some(s) = params.student_id {
            q = q.bind(s);
        }
        if let Some(ref s) = params.state {
            q = q.bind(s);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Move a fee from `from` to `to` without touching amounts.
    pub async fn set_state(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<Fee>, sqlx::Error> {
        let query =
            format!("UPDATE fees SET state = $3 WHERE id = $1 AND state = $2 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Fee>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Settle a fee in full: paid amount = amount, paid today.
    pub async fn mark_paid(
        pool: &PgPool,
        id: DbId,
        from: &str,
        today: Date,
    ) -> Result<Option<Fee>, sqlx::Error> {
        let query = format!(
            "UPDATE fees SET paid_amount = amount, payment_date = $3, state = 'paid' \
             WHERE id = $1 AND state = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(id)
            .bind(from)
            .bind(today)
            .fetch_optional(pool)
            .await
    }

    /// Store a payment computed against the row as it was read.
    ///
    /// Applies only while the fee still has `from` state and `prev_paid`;
    /// returns `None` if another payment got there first.
    #[allow(clippy::too_many_arguments)]
    pub async fn record_payment(
        pool: &PgPool,
        id: DbId,
        from: &str,
        prev_paid: f64,
        paid_amount: f64,
        to: &str,
        payment_method: &str,
        payment_date: Date,
    ) -> Result<Option<Fee>, sqlx::Error> {
        let query = format!(
            "UPDATE fees SET
                paid_amount = $4,
                state = $5,
                payment_method = $6,
                payment_date = $7
             WHERE id = $1 AND state = $2 AND paid_amount = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(id)
            .bind(from)
            .bind(prev_paid)
            .bind(paid_amount)
            .bind(to)
            .bind(payment_method)
            .bind(payment_date)
            .fetch_optional(pool)
            .await
    }

    /// Due or partially paid fees whose due date is before `today`.
    pub async fn list_overdue_candidates(
        pool: &PgPool,
        today: Date,
    ) -> Result<Vec<OverdueFee>, sqlx::Error> {
        sqlx::query_as::<_, OverdueFee>(
            "SELECT f.id, f.reference, f.student_id, \
                    s.first_name || ' ' || s.last_name AS student_name, \
                    f.amount, f.paid_amount, f.due_date, f.state \
             FROM fees f \
             JOIN students s ON s.id = f.student_id \
             WHERE f.state IN ('due', 'partial') AND f.due_date < $1 \
             ORDER BY f.due_date, f.id",
        )
        .bind(today)
        .fetch_all(pool)
        .await
    }

    pub async fn delete_draft(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM fees WHERE id = $1 AND state = 'draft'")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
