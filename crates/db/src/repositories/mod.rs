//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&PgPool` (or any executor, where the call must join a transaction) as
//! the first argument and return `sqlx::Error` on failure.

pub mod academic_year_repo;
pub mod activity_repo;
pub mod appointment_repo;
pub mod attendance_repo;
pub mod doctor_repo;
pub mod emergency_repo;
pub mod fee_repo;
pub mod grade_repo;
pub mod hospital_report_repo;
pub mod icu_bed_repo;
pub mod license_repo;
pub mod medicine_repo;
pub mod operator_repo;
pub mod patient_repo;
pub mod prescription_repo;
pub mod school_class_repo;
pub mod school_report_repo;
pub mod sequence_repo;
pub mod site_repo;
pub mod student_repo;
pub mod teacher_repo;
pub mod timetable_repo;
pub mod uaf_repo;
pub mod vital_sign_repo;

pub use academic_year_repo::AcademicYearRepo;
pub use activity_repo::ActivityRepo;
pub use appointment_repo::AppointmentRepo;
pub use attendance_repo::AttendanceRepo;
pub use doctor_repo::DoctorRepo;
pub use emergency_repo::EmergencyRepo;
pub use fee_repo::FeeRepo;
pub use grade_repo::GradeRepo;
pub use hospital_report_repo::HospitalReportRepo;
pub use icu_bed_repo::IcuBedRepo;
pub use license_repo::LicenseRepo;
pub use medicine_repo::MedicineRepo;
pub use operator_repo::OperatorRepo;
pub use patient_repo::{PatientInsert, PatientRepo};
pub use prescription_repo::{DispenseOutcome, PrescriptionRepo};
pub use school_class_repo::SchoolClassRepo;
pub use school_report_repo::SchoolReportRepo;
pub use sequence_repo::SequenceRepo;
pub use site_repo::SiteRepo;
pub use student_repo::{PromotionCandidate, StudentInsert, StudentRepo};
pub use teacher_repo::TeacherRepo;
pub use timetable_repo::TimetableRepo;
pub use uaf_repo::UafRepo;
pub use vital_sign_repo::VitalSignRepo;
