//! Aggregates behind the school reports.

use serde::Serialize;

use crate::types::Date;

/// One-day snapshot of the school.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySchoolReport {
    pub report_date: Date,
    pub total_students: i64,
    pub total_teachers: i64,
    pub attendance_today: i64,
    pub absent_today: i64,
    pub fee_collection_today: f64,
}

/// Average grade percentage of one class for an exam type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassPerformance {
    pub class_id: i64,
    pub class_name: String,
    pub total_students: i64,
    pub average_percentage: f64,
    pub class_teacher: String,
}

impl ClassPerformance {
    /// `None` for classes without students or without grades, which are left
    /// out of the report.
    pub fn from_totals(
        class_id: i64,
        class_name: String,
        class_teacher: Option<String>,
        total_students: i64,
        grade_count: i64,
        percentage_sum: f64,
    ) -> Option<Self> {
        if total_students == 0 || grade_count == 0 {
            return None;
        }
        Some(Self {
            class_id,
            class_name,
            total_students,
            average_percentage: super::grade::round2(percentage_sum / grade_count as f64),
            class_teacher: class_teacher.unwrap_or_else(|| "N/A".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_without_grades_is_omitted() {
        assert!(ClassPerformance::from_totals(1, "1A".into(), None, 20, 0, 0.0).is_none());
        assert!(ClassPerformance::from_totals(1, "1A".into(), None, 0, 5, 300.0).is_none());
    }

    #[test]
    fn average_is_rounded() {
        let p = ClassPerformance::from_totals(2, "2B".into(), None, 3, 3, 200.0).unwrap();
        assert_eq!(p.average_percentage, 66.67);
        assert_eq!(p.class_teacher, "N/A");
    }
}
