//! Repository for the `operators` table.

use regsuite_core::types::DbId;
use sqlx::PgPool;

use crate::models::operator::{CreateOperator, Operator, OperatorListParams, UpdateOperator};

/// Column list for `operators` queries (aliased `o`), including the
/// computed license count.
const COLUMNS: &str = "\
    o.id, o.partner_name, o.operator_code, o.operator_type, o.legal_name, \
    o.trading_name, o.tin, o.registration_no, o.is_uaf_contributor, o.uaf_rate, \
    o.status, o.created_by, \
    (SELECT COUNT(*) FROM licenses l WHERE l.operator_id = o.id) AS license_count, \
    o.created_at, o.updated_at";

/// Provides CRUD operations for operator profiles.
pub struct OperatorRepo;

impl OperatorRepo {
    /// Insert an operator with an already-resolved operator code.
    pub async fn create(
        pool: &PgPool,
        operator_code: &str,
        created_by: &str,
        input: &CreateOperator,
    ) -> Result<Operator, sqlx::Error> {
        let query = format!(
            "INSERT INTO operators AS o \
                (partner_name, operator_code, operator_type, legal_name, trading_name, \
                 tin, registration_no, is_uaf_contributor, uaf_rate, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, false), COALESCE($9, 0), $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Operator>(&query)
            .bind(&input.partner_name)
            .bind(operator_code)
            .bind(&input.operator_type)
            .bind(&input.legal_name)
            .bind(&input.trading_name)
            .bind(&input.tin)
            .bind(&input.registration_no)
            .bind(input.is_uaf_contributor)
            .bind(input.uaf_rate)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an operator by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Operator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM operators o WHERE o.id = $1");
        sqlx::query_as::<_, Operator>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List operators ordered by code, optionally filtered by status and type.
    pub async fn list(
        pool: &PgPool,
        params: &OperatorListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Operator>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if params.status.is_some() {
            conditions.push(format!("o.status = ${param_idx}"));
            param_idx += 1;
        }
        if params.operator_type.is_some() {
            conditions.push(format!("o.operator_type = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM operators o {where_clause} \
             ORDER BY o.operator_code \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Operator>(&query);
        if let Some(ref s) = params.status {
            q = q.bind(s);
        }
        if let Some(ref t) = params.operator_type {
            q = q.bind(t);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Update an operator profile. Returns `None` if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOperator,
    ) -> Result<Option<Operator>, sqlx::Error> {
        let query = format!(
            "UPDATE operators AS o SET
                partner_name = COALESCE($2, o.partner_name),
                operator_type = COALESCE($3, o.operator_type),
                legal_name = COALESCE($4, o.legal_name),
                trading_name = COALESCE($5, o.trading_name),
                tin = COALESCE($6, o.tin),
                registration_no = COALESCE($7, o.registration_no),
                is_uaf_contributor = COALESCE($8, o.is_uaf_contributor),
                uaf_rate = COALESCE($9, o.uaf_rate)
             WHERE o.id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Operator>(&query)
            .bind(id)
            .bind(&input.partner_name)
            .bind(&input.operator_type)
            .bind(&input.legal_name)
            .bind(&input.trading_name)
            .bind(&input.tin)
            .bind(&input.registration_no)
            .bind(input.is_uaf_contributor)
            .bind(input.uaf_rate)
            .fetch_optional(pool)
            .await
    }

    /// Move an operator from `from` to `to`.
    ///
    /// Returns `None` if the row is gone or no longer in `from`.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<Operator>, sqlx::Error> {
        let query = format!(
            "UPDATE operators AS o SET status = $3 \
             WHERE o.id = $1 AND o.status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Operator>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Delete an operator; its licenses go with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM operators WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
