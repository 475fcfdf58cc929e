//! Repository for the `timetable_slots` table.

use regsuite_core::types::DbId;
use sqlx::PgPool;

use crate::models::timetable::{CreateTimetableSlot, TimetableListParams, TimetableSlot};

/// Column list over `timetable_slots t JOIN subjects s`.
const COLUMNS: &str = "\
    t.id, t.class_id, t.section_id, t.subject_id, s.name AS subject_name, t.teacher_id, \
    t.day_of_week, t.start_time, t.end_time, t.room, t.created_at, t.updated_at";

pub struct TimetableRepo;

impl TimetableRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTimetableSlot,
    ) -> Result<TimetableSlot, sqlx::Error> {
        let query = format!(
            "WITH t AS ( \
                INSERT INTO timetable_slots \
                    (class_id, section_id, subject_id, teacher_id, day_of_week, start_time, \
                     end_time, room) \
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
                RETURNING * \
             ) \
             SELECT {COLUMNS} FROM t JOIN subjects s ON s.id = t.subject_id"
        );
        sqlx::query_as::<_, TimetableSlot>(&query)
            .bind(input.class_id)
            .bind(input.section_id)
            .bind(input.subject_id)
            .bind(input.teacher_id)
            .bind(&input.day_of_week)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.room)
            .fetch_one(pool)
            .await
    }

    /// Slots in weekday order, then by start time.
    pub async fn list(
        pool: &PgPool,
        params: &TimetableListParams,
    ) -> Result<Vec<TimetableSlot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM timetable_slots t JOIN subjects s ON s.id = t.subject_id \
             WHERE ($1::BIGINT IS NULL OR t.class_id = $1) \
               AND ($2::BIGINT IS NULL OR t.teacher_id = $2) \
               AND ($3::TEXT IS NULL OR t.day_of_week = $3) \
             ORDER BY array_position( \
                ARRAY['monday','tuesday','wednesday','thursday','friday','saturday'], \
                t.day_of_week), t.start_time"
        );
        sqlx::query_as::<_, TimetableSlot>(&query)
            .bind(params.class_id)
            .bind(params.teacher_id)
            .bind(&params.day_of_week)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM timetable_slots WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
