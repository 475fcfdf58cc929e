//! Repository for the `licenses` table.

use regsuite_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::license::{
    CreateLicense, ExpiringLicense, License, LicenseListParams, UpdateLicense,
};

/// Column list for `licenses` queries.
const COLUMNS: &str = "\
    id, operator_id, license_number, license_type, issue_date, expiry_date, \
    fee_amount, currency, status, conditions, created_by, created_at, updated_at";

/// Provides CRUD and reporting queries for licenses.
pub struct LicenseRepo;

impl LicenseRepo {
    /// Insert a license with an already-resolved license number.
    pub async fn create(
        pool: &PgPool,
        license_number: &str,
        created_by: &str,
        input: &CreateLicense,
    ) -> Result<License, sqlx::Error> {
        let query = format!(
            "INSERT INTO licenses \
                (operator_id, license_number, license_type, issue_date, expiry_date, \
                 fee_amount, currency, conditions, created_by) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), COALESCE($7, 'USD'), $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, License>(&query)
            .bind(input.operator_id)
            .bind(license_number)
            .bind(&input.license_type)
            .bind(input.issue_date)
            .bind(input.expiry_date)
            .bind(input.fee_amount)
            .bind(&input.currency)
            .bind(&input.conditions)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a license by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<License>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM licenses WHERE id = $1");
        sqlx::query_as::<_, License>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List licenses, soonest expiry first.
    pub async fn list(
        pool: &PgPool,
        params: &LicenseListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<License>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if params.operator_id.is_some() {
            conditions.push(format!("operator_id = ${param_idx}"));
            param_idx += 1;
        }
        if params.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM licenses {where_clause} \
             ORDER BY expiry_date ASC NULLS LAST, id \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, License>(&query);
        if let Some(op) = params.operator_id {
            q = q.bind(op);
        }
        if let Some(ref s) = params.status {
            q = q.bind(s);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Update a license. Returns `None` if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLicense,
    ) -> Result<Option<License>, sqlx::Error> {
        let query = format!(
            "UPDATE licenses SET
                license_type = COALESCE($2, license_type),
                issue_date = COALESCE($3, issue_date),
                expiry_date = COALESCE($4, expiry_date),
                fee_amount = COALESCE($5, fee_amount),
                currency = COALESCE($6, currency),
                conditions = COALESCE($7, conditions)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, License>(&query)
            .bind(id)
            .bind(&input.license_type)
            .bind(input.issue_date)
            .bind(input.expiry_date)
            .bind(input.fee_amount)
            .bind(&input.currency)
            .bind(&input.conditions)
            .fetch_optional(pool)
            .await
    }

    /// Move a license from `from` to `to`; `None` if it is no longer in `from`.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<License>, sqlx::Error> {
        let query = format!(
            "UPDATE licenses SET status = $3 WHERE id = $1 AND status = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, License>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM licenses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Active licenses whose expiry date falls before `cutoff`, with their
    /// operator, soonest first.
    pub async fn list_expiring_before(
        pool: &PgPool,
        cutoff: Date,
    ) -> Result<Vec<ExpiringLicense>, sqlx::Error> {
        sqlx::query_as::<_, ExpiringLicense>(
            "SELECT l.id, l.license_number, l.license_type, l.operator_id, \
                    o.operator_code, o.partner_name, l.expiry_date \
             FROM licenses l \
             JOIN operators o ON o.id = l.operator_id \
             WHERE l.status = 'active' \
               AND l.expiry_date IS NOT NULL \
               AND l.expiry_date < $1 \
             ORDER BY l.expiry_date, l.id",
        )
        .bind(cutoff)
        .fetch_all(pool)
        .await
    }
}
