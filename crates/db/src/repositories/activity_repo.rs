//! Repository for the `activities` table.

use regsuite_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::activity::{Activity, ActivityListParams, CreateActivity};

/// Column list for `activities` queries.
const COLUMNS: &str = "\
    id, entity_type, entity_id, activity_type, summary, note, assigned_to, \
    due_date, dedupe_key, done, created_at, updated_at";

/// Provides persistence for activities attached to records.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert an activity, returning the full row.
    pub async fn create<'e, E>(executor: E, input: &CreateActivity) -> Result<Activity, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO activities \
                (entity_type, entity_id, activity_type, summary, note, assigned_to, \
                 due_date, dedupe_key) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.activity_type)
            .bind(&input.summary)
            .bind(&input.note)
            .bind(&input.assigned_to)
            .bind(input.due_date)
            .bind(&input.dedupe_key)
            .fetch_one(executor)
            .await
    }

    /// Insert an activity unless one with the same dedupe key exists.
    ///
    /// Returns `None` when the key was already taken.
    pub async fn create_once<'e, E>(
        executor: E,
        input: &CreateActivity,
    ) -> Result<Option<Activity>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO activities \
                (entity_type, entity_id, activity_type, summary, note, assigned_to, \
                 due_date, dedupe_key) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (dedupe_key) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.activity_type)
            .bind(&input.summary)
            .bind(&input.note)
            .bind(&input.assigned_to)
            .bind(input.due_date)
            .bind(&input.dedupe_key)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List activities, newest first, optionally for one record.
    pub async fn list(
        pool: &PgPool,
        params: &ActivityListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if params.entity_type.is_some() {
            conditions.push(format!("entity_type = ${param_idx}"));
            param_idx += 1;
        }
        if params.entity_id.is_some() {
            conditions.push(format!("entity_id = ${param_idx}"));
            param_idx += 1;
        }
        if params.open_only.unwrap_or(false) {
            conditions.push("NOT done".to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM activities {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Activity>(&query);
        if let Some(ref t) = params.entity_type {
            q = q.bind(t);
        }
        if let Some(id) = params.entity_id {
            q = q.bind(id);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Mark an activity done.
    pub async fn mark_done(pool: &PgPool, id: DbId) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("UPDATE activities SET done = true WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
