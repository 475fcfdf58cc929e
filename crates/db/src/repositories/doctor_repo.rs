//! Repository for the `doctors` table.

use regsuite_core::types::DbId;
use sqlx::PgPool;

use crate::models::doctor::{CreateDoctor, Doctor, UpdateDoctor};

const COLUMNS: &str = "id, name, department, user_login, active, created_at, updated_at";

pub struct DoctorRepo;

impl DoctorRepo {
    pub async fn create(pool: &PgPool, input: &CreateDoctor) -> Result<Doctor, sqlx::Error> {
        let query = format!(
            "INSERT INTO doctors (name, department, user_login) VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Doctor>(&query)
            .bind(&input.name)
            .bind(&input.department)
            .bind(&input.user_login)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Doctor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM doctors WHERE id = $1");
        sqlx::query_as::<_, Doctor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List doctors by name; `active_only` hides deactivated ones.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<Doctor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM doctors WHERE ($1 = false OR active) ORDER BY name"
        );
        sqlx::query_as::<_, Doctor>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDoctor,
    ) -> Result<Option<Doctor>, sqlx::Error> {
        let query = format!(
            "UPDATE doctors SET
                name = COALESCE($2, name),
                department = COALESCE($3, department),
                user_login = COALESCE($4, user_login),
                active = COALESCE($5, active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Doctor>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.department)
            .bind(&input.user_login)
            .bind(input.active)
            .fetch_optional(pool)
            .await
    }
}
