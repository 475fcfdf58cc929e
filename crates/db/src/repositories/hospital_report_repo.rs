//! Aggregate queries behind the hospital reports.

use chrono::{Duration, NaiveTime};
use regsuite_core::hospital::reporting::{self, DailyCensus, DoctorPerformance, MonthlyStats};
use regsuite_core::types::{Date, DbId, Timestamp};
use sqlx::PgPool;

/// `[day 00:00 UTC, next day 00:00 UTC)`.
fn day_bounds(day: Date) -> (Timestamp, Timestamp) {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

pub struct HospitalReportRepo;

impl HospitalReportRepo {
    /// Census for `day`.
    pub async fn daily_census(pool: &PgPool, day: Date) -> Result<DailyCensus, sqlx::Error> {
        let (start, end) = day_bounds(day);
        let (total_patients, active_appointments, emergency_cases, new_prescriptions): (
            i64,
            i64,
            i64,
            i64,
        ) = sqlx::query_as(
            "SELECT \
                (SELECT COUNT(*) FROM patients), \
                (SELECT COUNT(*) FROM appointments \
                  WHERE appointment_date >= $1 AND appointment_date < $2 \
                    AND state IN ('confirmed', 'in_consultation')), \
                (SELECT COUNT(*) FROM emergency_cases \
                  WHERE arrival_time >= $1 AND arrival_time < $2), \
                (SELECT COUNT(*) FROM prescriptions \
                  WHERE prescription_date >= $1 AND prescription_date < $2)",
        )
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        Ok(DailyCensus {
            report_date: day,
            total_patients,
            active_appointments,
            emergency_cases,
            new_prescriptions,
        })
    }

    /// Appointment outcome per active doctor for appointments dated within
    /// `[from, to]` (whole days).
    pub async fn doctor_performance(
        pool: &PgPool,
        from: Date,
        to: Date,
    ) -> Result<Vec<DoctorPerformance>, sqlx::Error> {
        let (start, _) = day_bounds(from);
        let (_, end) = day_bounds(to);
        let rows: Vec<(DbId, String, Option<String>, i64, i64, f64)> = sqlx::query_as(
            "SELECT d.id, d.name, d.department, \
                    COUNT(a.id), \
                    COUNT(a.id) FILTER (WHERE a.state = 'done'), \
                    COALESCE(SUM(a.duration) FILTER (WHERE a.state = 'done'), 0) \
             FROM doctors d \
             LEFT JOIN appointments a \
               ON a.doctor_id = d.id \
              AND a.appointment_date >= $1 AND a.appointment_date < $2 \
             WHERE d.active \
             GROUP BY d.id, d.name, d.department \
             ORDER BY d.name",
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, department, total, completed, duration_sum)| {
                DoctorPerformance::from_counts(id, name, department, total, completed, duration_sum)
            })
            .collect())
    }

    /// Statistics for the month `[first, last]`.
    pub async fn monthly_stats(
        pool: &PgPool,
        first: Date,
        last: Date,
    ) -> Result<MonthlyStats, sqlx::Error> {
        let (start, _) = day_bounds(first);
        let (_, end) = day_bounds(last);
        let (total_patients, new_patients, total_appointments, completed_appointments): (
            i64,
            i64,
            i64,
            i64,
        ) = sqlx::query_as(
            "SELECT \
                (SELECT COUNT(*) FROM patients), \
                (SELECT COUNT(*) FROM patients WHERE created_at >= $1 AND created_at < $2), \
                (SELECT COUNT(*) FROM appointments \
                  WHERE appointment_date >= $1 AND appointment_date < $2), \
                (SELECT COUNT(*) FROM appointments \
                  WHERE appointment_date >= $1 AND appointment_date < $2 AND state = 'done')",
        )
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        Ok(MonthlyStats {
            period: reporting::month_label(first),
            total_patients,
            new_patients,
            total_appointments,
            completed_appointments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_bounds_span_one_utc_day() {
        let day = Date::from_ymd_opt(2026, 3, 31).unwrap();
        let (start, end) = day_bounds(day);
        assert_eq!(start.to_rfc3339(), "2026-03-31T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2026-04-01T00:00:00+00:00");
    }
}
