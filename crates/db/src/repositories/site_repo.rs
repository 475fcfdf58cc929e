//! Repository for the `sites` table.

use regsuite_core::types::DbId;
use sqlx::PgPool;

use crate::models::site::{CreateSite, Site, SiteListParams, UpdateSite};

const COLUMNS: &str = "\
    id, site_code, name, operator_id, site_type, address, latitude, longitude, \
    installation_date, co_location, active, created_at, updated_at";

/// Provides CRUD operations for sites and towers.
pub struct SiteRepo;

impl SiteRepo {
    pub async fn create(pool: &PgPool, input: &CreateSite) -> Result<Site, sqlx::Error> {
        let query = format!(
            "INSERT INTO sites \
                (site_code, name, operator_id, site_type, address, latitude, longitude, \
                 installation_date, co_location) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, false)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Site>(&query)
            .bind(&input.site_code)
            .bind(&input.name)
            .bind(input.operator_id)
            .bind(&input.site_type)
            .bind(&input.address)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.installation_date)
            .bind(input.co_location)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Site>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sites WHERE id = $1");
        sqlx::query_as::<_, Site>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &SiteListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Site>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if params.operator_id.is_some() {
            conditions.push(format!("operator_id = ${param_idx}"));
            param_idx += 1;
        }
        if params.active.is_some() {
            conditions.push(format!("active = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM sites {where_clause} \
             ORDER BY site_code \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Site>(&query);
        if let Some(op) = params.operator_id {
            q = q.bind(op);
        }
        if let Some(active) = params.active {
            q = q.bind(active);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSite,
    ) -> Result<Option<Site>, sqlx::Error> {
        let query = format!(
            "UPDATE sites SET
                name = COALESCE($2, name),
                operator_id = COALESCE($3, operator_id),
                site_type = COALESCE($4, site_type),
                address = COALESCE($5, address),
                latitude = COALESCE($6, latitude),
                longitude = COALESCE($7, longitude),
                installation_date = COALESCE($8, installation_date),
                co_location = COALESCE($9, co_location),
                active = COALESCE($10, active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Site>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.operator_id)
            .bind(&input.site_type)
            .bind(&input.address)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.installation_date)
            .bind(input.co_location)
            .bind(input.active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sites WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
