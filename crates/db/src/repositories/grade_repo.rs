//! Repository for the `grades` table.
//!
//! Percentage and letter grade are derived from the marks on every write.

use regsuite_core::school::grade;
use regsuite_core::types::DbId;
use sqlx::PgPool;

use crate::models::grade::{Grade, GradeListParams, UpdateGrade};

const COLUMNS: &str = "\
    id, student_id, subject_id, academic_year_id, exam_type, marks_obtained, total_marks, \
    percentage, grade, created_at, updated_at";

pub struct GradeRepo;

impl GradeRepo {
    pub async fn create(
        pool: &PgPool,
        student_id: DbId,
        subject_id: DbId,
        academic_year_id: DbId,
        exam_type: &str,
        marks_obtained: f64,
        total_marks: f64,
    ) -> Result<Grade, sqlx::Error> {
        let percentage = grade::percentage(marks_obtained, total_marks);
        let query = format!(
            "INSERT INTO grades \
                (student_id, subject_id, academic_year_id, exam_type, marks_obtained, \
                 total_marks, percentage, grade) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(student_id)
            .bind(subject_id)
            .bind(academic_year_id)
            .bind(exam_type)
            .bind(marks_obtained)
            .bind(total_marks)
            .bind(percentage)
            .bind(grade::letter(percentage))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Grade>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM grades WHERE id = $1");
        sqlx::query_as::<_, Grade>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &GradeListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Grade>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM grades \
             WHERE ($1::BIGINT IS NULL OR student_id = $1) \
               AND ($2::TEXT IS NULL OR exam_type = $2) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(params.student_id)
            .bind(&params.exam_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Change the marks of a grade and recompute the derived columns from
    /// the merged values.
    pub async fn update(
        pool: &PgPool,
        current: &Grade,
        input: &UpdateGrade,
    ) -> Result<Option<Grade>, sqlx::Error> {
        let marks = input.marks_obtained.unwrap_or(current.marks_obtained);
        let total = input.total_marks.unwrap_or(current.total_marks);
        let percentage = grade::percentage(marks, total);
        let query = format!(
            "UPDATE grades SET marks_obtained = $2, total_marks = $3, percentage = $4, grade = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(current.id)
            .bind(marks)
            .bind(total)
            .bind(percentage)
            .bind(grade::letter(percentage))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM grades WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
