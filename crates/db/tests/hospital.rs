//! Guarded writes of the hospital repositories.

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use regsuite_db::models::appointment::CreateAppointment;
use regsuite_db::models::doctor::{CreateDoctor, Doctor};
use regsuite_db::models::emergency::CreateEmergencyCase;
use regsuite_db::models::icu_bed::CreateIcuBed;
use regsuite_db::models::medicine::{CreateDoseUnit, CreateMedicine};
use regsuite_db::models::patient::{CreatePatient, Patient};
use regsuite_db::models::prescription::{CreatePrescription, CreatePrescriptionLine};
use regsuite_db::repositories::{
    AppointmentRepo, DispenseOutcome, DoctorRepo, EmergencyRepo, IcuBedRepo, MedicineRepo,
    PatientInsert, PatientRepo, PrescriptionRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_patient(name: &str, contact: Option<&str>) -> CreatePatient {
    CreatePatient {
        patient_id: None,
        name: name.to_string(),
        date_of_birth: None,
        registration_date: None,
        gender: None,
        blood_group: None,
        marital_status: None,
        contact_number: contact.map(str::to_string),
        email: None,
        address: None,
        emergency_contact: None,
        emergency_phone: None,
        medical_history: None,
        allergies: None,
        insurance_id: None,
        insurance_provider: None,
        case_description: None,
    }
}

async fn register(pool: &PgPool, name: &str, contact: Option<&str>) -> PatientInsert {
    PatientRepo::create(pool, &new_patient(name, contact))
        .await
        .unwrap()
}

async fn registered(pool: &PgPool, name: &str) -> Patient {
    assert_matches!(register(pool, name, None).await, PatientInsert::Created(p) => p)
}

async fn doctor(pool: &PgPool) -> Doctor {
    DoctorRepo::create(
        pool,
        &CreateDoctor { name: "Dr. Iyer".into(), department: None, user_login: None },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn patient_gets_identifier_and_draft_state(pool: PgPool) {
    let patient = assert_matches!(
        register(&pool, "Asha Rao", Some("9876543210")).await,
        PatientInsert::Created(p) => p
    );
    assert_eq!(patient.patient_id, "PAT0001");
    assert_eq!(patient.state, "draft");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn duplicate_contact_is_rejected_without_drawing_an_identifier(pool: PgPool) {
    register(&pool, "Asha Rao", Some("9876543210")).await;

    let existing = assert_matches!(
        register(&pool, "Someone Else", Some("9876543210")).await,
        PatientInsert::DuplicateContact(p) => p
    );
    assert_eq!(existing.name, "Asha Rao");

    let next = assert_matches!(
        register(&pool, "Third Patient", Some("1112223334")).await,
        PatientInsert::Created(p) => p
    );
    assert_eq!(next.patient_id, "PAT0002");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn patients_without_contact_never_collide(pool: PgPool) {
    assert_matches!(register(&pool, "A", None).await, PatientInsert::Created(_));
    assert_matches!(register(&pool, "B", None).await, PatientInsert::Created(_));
}

// ---------------------------------------------------------------------------
// ICU beds
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn booked_bed_cannot_be_deleted(pool: PgPool) {
    let patient = assert_matches!(
        register(&pool, "Bed User", None).await,
        PatientInsert::Created(p) => p
    );
    let booked = IcuBedRepo::create(
        &pool,
        &CreateIcuBed { name: "ICU Bed A1".into(), notes: None },
    )
    .await
    .unwrap();
    let free = IcuBedRepo::create(
        &pool,
        &CreateIcuBed { name: "ICU Bed A2".into(), notes: None },
    )
    .await
    .unwrap();

    let booked = IcuBedRepo::assign(&pool, booked.id, patient.id)
        .await
        .unwrap()
        .expect("available bed should be assignable");
    assert_eq!(booked.status, "booked");

    assert!(!IcuBedRepo::delete_unbooked(&pool, booked.id).await.unwrap());
    assert!(IcuBedRepo::delete_unbooked(&pool, free.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn bed_names_are_unique(pool: PgPool) {
    let input = CreateIcuBed { name: "ICU Bed B1".into(), notes: None };
    IcuBedRepo::create(&pool, &input).await.unwrap();

    let err = IcuBedRepo::create(&pool, &input).await.unwrap_err();
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("uq_icu_beds_name"));
}

// ---------------------------------------------------------------------------
// Prescriptions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn dispense_decrements_stock_or_rejects_shortage(pool: PgPool) {
    let patient = assert_matches!(
        register(&pool, "Rx Patient", None).await,
        PatientInsert::Created(p) => p
    );
    let doctor = DoctorRepo::create(
        &pool,
        &CreateDoctor { name: "Dr. Mehta".into(), department: None, user_login: None },
    )
    .await
    .unwrap();
    let medicine = MedicineRepo::create(
        &pool,
        &CreateMedicine { name: "Paracetamol".into(), qty_available: Some(10.0), unit: None },
    )
    .await
    .unwrap();

    let prescribe = |quantity: f64| CreatePrescription {
        reference: None,
        patient_id: patient.id,
        doctor_id: doctor.id,
        appointment_id: None,
        notes: None,
        lines: vec![CreatePrescriptionLine {
            medicine_id: medicine.id,
            quantity,
            dosage: None,
            duration: None,
            notes: None,
        }],
    };

    // Draft prescriptions cannot be dispensed.
    let small = PrescriptionRepo::create(&pool, &prescribe(4.0)).await.unwrap();
    assert_matches!(
        PrescriptionRepo::dispense(&pool, small.prescription.id).await.unwrap(),
        DispenseOutcome::NotConfirmed
    );

    PrescriptionRepo::set_state(&pool, small.prescription.id, "draft", "confirmed")
        .await
        .unwrap()
        .unwrap();
    assert_matches!(
        PrescriptionRepo::dispense(&pool, small.prescription.id).await.unwrap(),
        DispenseOutcome::Dispensed(p) if p.state == "dispensed"
    );
    let left = MedicineRepo::find_by_id(&pool, medicine.id).await.unwrap().unwrap();
    assert_eq!(left.qty_available, 6.0);

    let large = PrescriptionRepo::create(&pool, &prescribe(7.0)).await.unwrap();
    PrescriptionRepo::set_state(&pool, large.prescription.id, "draft", "confirmed")
        .await
        .unwrap()
        .unwrap();
    assert_matches!(
        PrescriptionRepo::dispense(&pool, large.prescription.id).await.unwrap(),
        DispenseOutcome::ShortStock(_)
    );
    let unchanged = PrescriptionRepo::find_by_id(&pool, large.prescription.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.state, "confirmed");
}

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn completing_a_consultation_writes_one_medical_record(pool: PgPool) {
    let patient = registered(&pool, "Visit Patient").await;
    let doctor = doctor(&pool).await;
    let booked = AppointmentRepo::create(
        &pool,
        &CreateAppointment {
            reference: None,
            patient_id: patient.id,
            doctor_id: doctor.id,
            appointment_date: Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap(),
            duration: None,
            reason: "Fever".into(),
            symptoms: Some("High temperature".into()),
            priority: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(booked.state, "draft");
    assert_eq!(booked.duration, 0.5);

    // Only a consultation in progress can be completed.
    assert!(AppointmentRepo::complete(&pool, booked.id).await.unwrap().is_none());

    AppointmentRepo::set_state(&pool, booked.id, "draft", "confirmed")
        .await
        .unwrap()
        .unwrap();
    AppointmentRepo::set_state(&pool, booked.id, "confirmed", "in_consultation")
        .await
        .unwrap()
        .unwrap();

    let (done, record) = AppointmentRepo::complete(&pool, booked.id)
        .await
        .unwrap()
        .expect("consultation should complete");
    assert_eq!(done.state, "done");
    assert_eq!(record.appointment_id, Some(booked.id));
    assert_eq!(record.patient_id, patient.id);
    assert_eq!(record.doctor_id, doctor.id);
    assert_eq!(record.visit_date, booked.appointment_date);
    assert_eq!(record.symptoms.as_deref(), Some("High temperature"));

    // Completing again changes nothing.
    assert!(AppointmentRepo::complete(&pool, booked.id).await.unwrap().is_none());
    let records = AppointmentRepo::list_medical_records(&pool, patient.id).await.unwrap();
    assert_eq!(records.len(), 1);
}

// ---------------------------------------------------------------------------
// Emergency cases
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn emergency_case_is_stamped_through_treatment_and_discharge(pool: PgPool) {
    let patient = registered(&pool, "ER Patient").await;
    let case = EmergencyRepo::create(
        &pool,
        &CreateEmergencyCase {
            reference: None,
            patient_id: patient.id,
            triage_level: "urgent".into(),
            chief_complaint: "Chest pain".into(),
            vital_signs: None,
            initial_assessment: None,
            assigned_doctor_id: None,
            nurse_name: Some("Nurse Joy".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(case.state, "arrived");
    assert!(case.treatment_start_time.is_none());
    assert!(case.discharge_time.is_none());

    let triaged = EmergencyRepo::set_state(&pool, case.id, "arrived", "triaged")
        .await
        .unwrap()
        .unwrap();
    assert!(triaged.treatment_start_time.is_none());

    let treated = EmergencyRepo::set_state(&pool, case.id, "triaged", "in_treatment")
        .await
        .unwrap()
        .unwrap();
    let started = treated.treatment_start_time.expect("treatment start should be stamped");

    // A stale transition loses the race and leaves the row alone.
    assert!(EmergencyRepo::set_state(&pool, case.id, "triaged", "in_treatment")
        .await
        .unwrap()
        .is_none());

    let discharged = EmergencyRepo::set_state(&pool, case.id, "in_treatment", "discharged")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(discharged.state, "discharged");
    assert_eq!(discharged.treatment_start_time, Some(started));
    assert!(discharged.discharge_time.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn unknown_triage_level_is_rejected(pool: PgPool) {
    let patient = registered(&pool, "ER Patient").await;
    let err = EmergencyRepo::create(
        &pool,
        &CreateEmergencyCase {
            reference: None,
            patient_id: patient.id,
            triage_level: "whenever".into(),
            chief_complaint: "Headache".into(),
            vital_signs: None,
            initial_assessment: None,
            assigned_doctor_id: None,
            nurse_name: None,
        },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("ck_emergency_cases_triage_level"));
}

// ---------------------------------------------------------------------------
// Dose units
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn dose_unit_description_is_limited_to_128_characters(pool: PgPool) {
    let fits = MedicineRepo::create_dose_unit(
        &pool,
        &CreateDoseUnit { name: "mg".into(), description: "m".repeat(128) },
    )
    .await
    .unwrap();
    assert_eq!(fits.description.len(), 128);

    let err = MedicineRepo::create_dose_unit(
        &pool,
        &CreateDoseUnit { name: "ml".into(), description: "m".repeat(129) },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("ck_dose_units_description"));

    let err = MedicineRepo::create_dose_unit(
        &pool,
        &CreateDoseUnit { name: "tab".into(), description: "   ".into() },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("ck_dose_units_description"));
}
