//! Aggregate queries behind the school reports.

use regsuite_core::person;
use regsuite_core::school::reporting::{ClassPerformance, DailySchoolReport};
use regsuite_core::types::{Date, DbId};
use sqlx::PgPool;

pub struct SchoolReportRepo;

impl SchoolReportRepo {
    /// Snapshot for `day`.
    pub async fn daily_report(pool: &PgPool, day: Date) -> Result<DailySchoolReport, sqlx::Error> {
        let (total_students, total_teachers, attendance_today, absent_today, fee_collection_today): (
            i64,
            i64,
            i64,
            i64,
            f64,
        ) = sqlx::query_as(
            "SELECT \
                (SELECT COUNT(*) FROM students WHERE status = 'active'), \
                (SELECT COUNT(*) FROM teachers WHERE status = 'active'), \
                (SELECT COUNT(*) FROM attendance WHERE date = $1 AND status = 'present'), \
                (SELECT COUNT(*) FROM attendance WHERE date = $1 AND status = 'absent'), \
                (SELECT COALESCE(SUM(paid_amount), 0) FROM fees \
                  WHERE payment_date = $1 AND state = 'paid')",
        )
        .bind(day)
        .fetch_one(pool)
        .await?;

        Ok(DailySchoolReport {
            report_date: day,
            total_students,
            total_teachers,
            attendance_today,
            absent_today,
            fee_collection_today,
        })
    }

    /// Average grade percentage per class for one exam type of a year.
    /// Classes without students or grades are left out.
    pub async fn class_performance(
        pool: &PgPool,
        academic_year_id: DbId,
        exam_type: &str,
    ) -> Result<Vec<ClassPerformance>, sqlx::Error> {
        #[allow(clippy::type_complexity)]
        let rows: Vec<(DbId, String, Option<String>, Option<String>, i64, i64, f64)> =
            sqlx::query_as(
                "SELECT c.id, c.name, t.first_name, t.last_name, \
                        (SELECT COUNT(*) FROM students s \
                          WHERE s.class_id = c.id AND s.academic_year_id = $1), \
                        (SELECT COUNT(*) FROM grades g JOIN students s ON s.id = g.student_id \
                          WHERE s.class_id = c.id AND s.academic_year_id = $1 \
                            AND g.academic_year_id = $1 AND g.exam_type = $2), \
                        (SELECT COALESCE(SUM(g.percentage), 0) FROM grades g \
                           JOIN students s ON s.id = g.student_id \
                          WHERE s.class_id = c.id AND s.academic_year_id = $1 \
                            AND g.academic_year_id = $1 AND g.exam_type = $2) \
                 FROM classes c \
                 LEFT JOIN teachers t ON t.id = c.class_teacher_id \
                 ORDER BY c.code",
            )
            .bind(academic_year_id)
            .bind(exam_type)
            .fetch_all(pool)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(id, name, first, last, students, grades, sum)| {
                let teacher = match (first, last) {
                    (Some(f), Some(l)) => Some(person::display_name(&f, &l)),
                    _ => None,
                };
                ClassPerformance::from_totals(id, name, teacher, students, grades, sum)
            })
            .collect())
    }
}
