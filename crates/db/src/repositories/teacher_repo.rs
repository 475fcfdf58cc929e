//! Repository for the `teachers` table.

use regsuite_core::sequence;
use regsuite_core::types::DbId;
use sqlx::PgPool;

use crate::models::teacher::{CreateTeacher, Teacher, TeacherListParams, UpdateTeacher};
use crate::repositories::SequenceRepo;

const COLUMNS: &str = "\
    id, teacher_id, first_name, last_name, qualification, specialization, joining_date, \
    experience_years, is_class_teacher, phone, email, address, status, created_at, updated_at";

pub struct TeacherRepo;

impl TeacherRepo {
    pub async fn create(pool: &PgPool, input: &CreateTeacher) -> Result<Teacher, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let teacher_id =
            SequenceRepo::assign(&mut *tx, &sequence::TEACHER, input.teacher_id.as_deref()).await?;

        let query = format!(
            "INSERT INTO teachers \
                (teacher_id, first_name, last_name, qualification, specialization, \
                 joining_date, experience_years, is_class_teacher, phone, email, address) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, CURRENT_DATE), COALESCE($7, 0), \
                     COALESCE($8, false), $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        let teacher = sqlx::query_as::<_, Teacher>(&query)
            .bind(&teacher_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.qualification)
            .bind(&input.specialization)
            .bind(input.joining_date)
            .bind(input.experience_years)
            .bind(input.is_class_teacher)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(teacher)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teachers WHERE id = $1");
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &TeacherListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Teacher>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teachers \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY last_name, first_name \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(&params.status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeacher,
    ) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!(
            "UPDATE teachers SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                qualification = COALESCE($4, qualification),
                specialization = COALESCE($5, specialization),
                experience_years = COALESCE($6, experience_years),
                is_class_teacher = COALESCE($7, is_class_teacher),
                phone = COALESCE($8, phone),
                email = COALESCE($9, email),
                address = COALESCE($10, address),
                status = COALESCE($11, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.qualification)
            .bind(&input.specialization)
            .bind(input.experience_years)
            .bind(input.is_class_teacher)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }
}
