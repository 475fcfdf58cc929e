//! Repository for UAF declarations and payments.

use regsuite_core::operator::InvoiceWindow;
use regsuite_core::types::DbId;
use sqlx::PgPool;

use crate::models::uaf::{
    CreateUafDeclaration, CreateUafPayment, UafDeclaration, UafDeclarationListParams, UafPayment,
    UpdateUafDeclaration,
};

const COLUMNS: &str = "\
    id, operator_id, period_start, period_end, declared_amount, currency, state, \
    invoiced_at, notes, created_at, updated_at";

const PAYMENT_COLUMNS: &str = "\
    id, declaration_id, amount, currency, payment_date, received_by, created_at, updated_at";

/// Declarations, their payments and the invoicing batch.
pub struct UafRepo;

impl UafRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateUafDeclaration,
    ) -> Result<UafDeclaration, sqlx::Error> {
        let query = format!(
            "INSERT INTO uaf_declarations \
                (operator_id, period_start, period_end, declared_amount, currency, notes) \
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, 'USD'), $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UafDeclaration>(&query)
            .bind(input.operator_id)
            .bind(input.period_start)
            .bind(input.period_end)
            .bind(input.declared_amount)
            .bind(&input.currency)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UafDeclaration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM uaf_declarations WHERE id = $1");
        sqlx::query_as::<_, UafDeclaration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &UafDeclarationListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UafDeclaration>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if params.operator_id.is_some() {
            conditions.push(format!("operator_id = ${param_idx}"));
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
            "SELECT {COLUMNS} FROM uaf_declarations {where_clause} \
             ORDER BY period_start DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, UafDeclaration>(&query);
        if let Some(op) = params.operator_id {
            q = q.bind(op);
        }
        if let Some(ref s) = params.state {
            q = q.bind(s);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Update a declaration while it is still a draft.
    ///
    /// Returns `None` if the row is missing or has left the draft state.
    pub async fn update_draft(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUafDeclaration,
    ) -> Result<Option<UafDeclaration>, sqlx::Error> {
        let query = format!(
            "UPDATE uaf_declarations SET
                period_start = COALESCE($2, period_start),
                period_end = COALESCE($3, period_end),
                declared_amount = COALESCE($4, declared_amount),
                currency = COALESCE($5, currency),
                notes = COALESCE($6, notes)
             WHERE id = $1 AND state = 'draft'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UafDeclaration>(&query)
            .bind(id)
            .bind(input.period_start)
            .bind(input.period_end)
            .bind(input.declared_amount)
            .bind(&input.currency)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Move a declaration from `from` to `to`, stamping `invoiced_at` when
    /// it becomes invoiced.
    pub async fn set_state(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<UafDeclaration>, sqlx::Error> {
        let query = format!(
            "UPDATE uaf_declarations SET
                state = $3,
                invoiced_at = CASE WHEN $3 = 'invoiced' THEN NOW() ELSE invoiced_at END
             WHERE id = $1 AND state = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UafDeclaration>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Invoice every verified declaration the wizard window covers.
    ///
    /// Candidates are locked, filtered with [`InvoiceWindow::covers`] and
    /// moved to `invoiced` in one transaction. Returns the invoiced rows;
    /// a rerun finds nothing left in `verified` and returns an empty list.
    pub async fn invoice_verified(
        pool: &PgPool,
        window: &InvoiceWindow,
    ) -> Result<Vec<UafDeclaration>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM uaf_declarations \
             WHERE state = 'verified' AND period_start >= $1 AND period_end <= $2 \
             ORDER BY id \
             FOR UPDATE"
        );
        let candidates = sqlx::query_as::<_, UafDeclaration>(&query)
            .bind(window.date_from)
            .bind(window.date_to)
            .fetch_all(&mut *tx)
            .await?;

        let ids: Vec<DbId> = candidates
            .iter()
            .filter(|d| window.covers(d.operator_id, d.period_start, d.period_end))
            .map(|d| d.id)
            .collect();

        let query = format!(
            "UPDATE uaf_declarations SET state = 'invoiced', invoiced_at = NOW() \
             WHERE id = ANY($1) \
             RETURNING {COLUMNS}"
        );
        let invoiced = sqlx::query_as::<_, UafDeclaration>(&query)
            .bind(&ids)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(invoiced)
    }

    pub async fn delete_draft(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM uaf_declarations WHERE id = $1 AND state = 'draft'")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Payments
    // -----------------------------------------------------------------------

    pub async fn add_payment(
        pool: &PgPool,
        declaration_id: DbId,
        received_by: &str,
        input: &CreateUafPayment,
    ) -> Result<UafPayment, sqlx::Error> {
        let query = format!(
            "INSERT INTO uaf_payments (declaration_id, amount, currency, payment_date, received_by) \
             VALUES ($1, $2, COALESCE($3, 'USD'), COALESCE($4, CURRENT_DATE), $5) \
             RETURNING {PAYMENT_COLUMNS}"
        );
        sqlx::query_as::<_, UafPayment>(&query)
            .bind(declaration_id)
            .bind(input.amount)
            .bind(&input.currency)
            .bind(input.payment_date)
            .bind(received_by)
            .fetch_one(pool)
            .await
    }

    pub async fn list_payments(
        pool: &PgPool,
        declaration_id: DbId,
    ) -> Result<Vec<UafPayment>, sqlx::Error> {
        let query = format!(
            "SELECT {PAYMENT_COLUMNS} FROM uaf_payments WHERE declaration_id = $1 \
             ORDER BY payment_date, id"
        );
        sqlx::query_as::<_, UafPayment>(&query)
            .bind(declaration_id)
            .fetch_all(pool)
            .await
    }
}
