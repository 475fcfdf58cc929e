//! Repository for classes, sections and subjects.

use regsuite_core::types::DbId;
use sqlx::PgPool;

use crate::models::school_class::{
    CreateSchoolClass, CreateSection, CreateSubject, SchoolClass, Section, Subject,
    UpdateSchoolClass,
};

/// Column list for `classes` queries (aliased `c`), including the live
/// head count.
const COLUMNS: &str = "\
    c.id, c.name, c.code, c.class_teacher_id, c.capacity, \
    (SELECT COUNT(*) FROM students s WHERE s.class_id = c.id AND s.status = 'active') \
        AS current_students, \
    c.created_at, c.updated_at";

const SECTION_COLUMNS: &str = "\
    id, name, class_id, class_teacher_id, room_number, created_at, updated_at";

const SUBJECT_COLUMNS: &str = "id, name, code, created_at, updated_at";

pub struct SchoolClassRepo;

impl SchoolClassRepo {
    pub async fn create(pool: &PgPool, input: &CreateSchoolClass) -> Result<SchoolClass, sqlx::Error> {
        let query = format!(
            "INSERT INTO classes AS c (name, code, class_teacher_id, capacity) \
             VALUES ($1, $2, $3, COALESCE($4, 30)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SchoolClass>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.class_teacher_id)
            .bind(input.capacity)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SchoolClass>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM classes c WHERE c.id = $1");
        sqlx::query_as::<_, SchoolClass>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<SchoolClass>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM classes c WHERE c.code = $1");
        sqlx::query_as::<_, SchoolClass>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<SchoolClass>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM classes c ORDER BY c.code");
        sqlx::query_as::<_, SchoolClass>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSchoolClass,
    ) -> Result<Option<SchoolClass>, sqlx::Error> {
        let query = format!(
            "UPDATE classes AS c SET
                name = COALESCE($2, c.name),
                class_teacher_id = COALESCE($3, c.class_teacher_id),
                capacity = COALESCE($4, c.capacity)
             WHERE c.id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SchoolClass>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.class_teacher_id)
            .bind(input.capacity)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// First and last name of the class teacher, if one is assigned.
    pub async fn class_teacher_name(
        pool: &PgPool,
        class_id: DbId,
    ) -> Result<Option<(String, String)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT t.first_name, t.last_name FROM classes c \
             JOIN teachers t ON t.id = c.class_teacher_id \
             WHERE c.id = $1",
        )
        .bind(class_id)
        .fetch_optional(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Sections
    // -----------------------------------------------------------------------

    pub async fn create_section(
        pool: &PgPool,
        class_id: DbId,
        input: &CreateSection,
    ) -> Result<Section, sqlx::Error> {
        let query = format!(
            "INSERT INTO sections (name, class_id, class_teacher_id, room_number) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {SECTION_COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(&input.name)
            .bind(class_id)
            .bind(input.class_teacher_id)
            .bind(&input.room_number)
            .fetch_one(pool)
            .await
    }

    pub async fn list_sections(pool: &PgPool, class_id: DbId) -> Result<Vec<Section>, sqlx::Error> {
        let query =
            format!("SELECT {SECTION_COLUMNS} FROM sections WHERE class_id = $1 ORDER BY name");
        sqlx::query_as::<_, Section>(&query)
            .bind(class_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Subjects
    // -----------------------------------------------------------------------

    pub async fn create_subject(pool: &PgPool, input: &CreateSubject) -> Result<Subject, sqlx::Error> {
        let query = format!(
            "INSERT INTO subjects (name, code) VALUES ($1, $2) RETURNING {SUBJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .fetch_one(pool)
            .await
    }

    pub async fn list_subjects(pool: &PgPool) -> Result<Vec<Subject>, sqlx::Error> {
        let query = format!("SELECT {SUBJECT_COLUMNS} FROM subjects ORDER BY code");
        sqlx::query_as::<_, Subject>(&query).fetch_all(pool).await
    }
}
