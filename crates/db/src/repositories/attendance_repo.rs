//! Repository for the `attendance` table.

use regsuite_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::attendance::{
    Attendance, AttendanceListParams, AttendanceSummary, CreateAttendance, UpdateAttendance,
};
use crate::models::student::Student;

const COLUMNS: &str = "\
    id, student_id, date, status, class_id, section_id, remarks, created_at, updated_at";

pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Record a student's attendance; class and section are copied from
    /// the student.
    pub async fn create(
        pool: &PgPool,
        date: Date,
        input: &CreateAttendance,
    ) -> Result<Attendance, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance (student_id, date, status, class_id, section_id, remarks) \
             SELECT s.id, $2, $3, s.class_id, s.section_id, $4 FROM students s WHERE s.id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(input.student_id)
            .bind(date)
            .bind(&input.status)
            .bind(&input.remarks)
            .fetch_one(pool)
            .await
    }

    /// Insert a record for `student` on `date` unless one exists.
    ///
    /// Returns `true` if a record was created.
    pub async fn create_if_absent(
        pool: &PgPool,
        student: &Student,
        date: Date,
        status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO attendance (student_id, date, status, class_id, section_id) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (student_id, date) DO NOTHING",
        )
        .bind(student.id)
        .bind(date)
        .bind(status)
        .bind(student.class_id)
        .bind(student.section_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attendance WHERE id = $1");
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &AttendanceListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if params.student_id.is_some() {
            conditions.push(format!("student_id = ${param_idx}"));
            param_idx += 1;
        }
        if params.class_id.is_some() {
            conditions.push(format!("class_id = ${param_idx}"));
            param_idx += 1;
        }
        if params.date.is_some() {
            conditions.push(format!("date = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM attendance {where_clause} \
             ORDER BY date DESC, student_id \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Attendance>(&query);
        if let Some(s) = params.student_id {
            q = q.bind(s);
        }
        if let Some(c) = params.class_id {
            q = q.bind(c);
        }
        if let Some(d) = params.date {
            q = q.bind(d);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAttendance,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!(
            "UPDATE attendance SET
                status = COALESCE($2, status),
                remarks = COALESCE($3, remarks)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.remarks)
            .fetch_optional(pool)
            .await
    }

    /// Per-student totals over `[from, to]` for active students with at
    /// least one record in the range.
    pub async fn summarize(
        pool: &PgPool,
        from: Date,
        to: Date,
    ) -> Result<Vec<AttendanceSummary>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceSummary>(
            "SELECT s.id AS student_id, \
                    s.first_name || ' ' || s.last_name AS student_name, \
                    s.parent_email, \
                    COUNT(*) AS total_days, \
                    COUNT(*) FILTER (WHERE a.status = 'present') AS present_days \
             FROM attendance a \
             JOIN students s ON s.id = a.student_id \
             WHERE s.status = 'active' AND a.date >= $1 AND a.date <= $2 \
             GROUP BY s.id, s.first_name, s.last_name, s.parent_email \
             ORDER BY s.id",
        )
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }
}
