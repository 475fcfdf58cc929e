//! Handlers for hospital patients.
//!
//! Every response carries the derived age fields, recomputed against
//! today's date on each read.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::age::validate_not_future;
use regsuite_core::error::CoreError;
use regsuite_core::hospital::patient::{duplicate_contact_error, PatientState, PatientStatus};
use regsuite_core::person::{self, BloodGroup, Gender, MaritalStatus};
use regsuite_core::types::{Date, DbId};
use regsuite_db::models::patient::{
    CreatePatient, Patient, PatientListParams, PatientView, UpdatePatient,
};
use regsuite_db::repositories::{AppointmentRepo, PatientInsert, PatientRepo, VitalSignRepo};

use super::{changed_concurrently, check_choice, check_transition, not_found};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::page;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/patients
pub async fn list_patients(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PatientListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PATIENT, Operation::Read)?;
    let (limit, offset) = page(params.limit, params.offset);
    let today = Utc::now().date_naive();

    let patients: Vec<PatientView> = PatientRepo::list(&state.pool, &params, limit, offset)
        .await?
        .into_iter()
        .map(|p| PatientView::new(p, today))
        .collect();

    Ok(Json(DataResponse { data: patients }))
}

/// POST /api/v1/patients
///
/// Rejects a contact number that is already registered, naming the patient
/// who holds it. A `PAT` identifier is drawn only when the patient is
/// actually written.
pub async fn create_patient(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePatient>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PATIENT, Operation::Create)?;
    let today = Utc::now().date_naive();

    person::validate_name("Name", &input.name)?;
    validate_details(
        today,
        input.date_of_birth,
        input.contact_number.as_deref(),
        input.email.as_deref(),
        input.gender.as_deref(),
        input.blood_group.as_deref(),
        input.marital_status.as_deref(),
    )?;
    if let Some(registered) = input.registration_date {
        validate_not_future("Registration date", registered.date_naive(), today)?;
    }

    let patient = match PatientRepo::create(&state.pool, &input).await? {
        PatientInsert::Created(patient) => patient,
        PatientInsert::DuplicateContact(existing) => {
            let contact = existing.contact_number.as_deref().unwrap_or_default();
            return Err(duplicate_contact_error(contact, &existing.name).into());
        }
    };

    tracing::info!(
        patient_id = patient.id,
        reference = %patient.patient_id,
        user_id = auth.user_id,
        "Patient registered",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: PatientView::new(patient, today) })))
}

/// GET /api/v1/patients/{id}
pub async fn get_patient(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PATIENT, Operation::Read)?;
    let patient = find(&state, id).await?;

    Ok(Json(DataResponse { data: PatientView::new(patient, Utc::now().date_naive()) }))
}

/// PUT /api/v1/patients/{id}
pub async fn update_patient(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePatient>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PATIENT, Operation::Write)?;
    let today = Utc::now().date_naive();

    if let Some(name) = input.name.as_deref() {
        person::validate_name("Name", name)?;
    }
    validate_details(
        today,
        input.date_of_birth,
        input.contact_number.as_deref(),
        input.email.as_deref(),
        input.gender.as_deref(),
        input.blood_group.as_deref(),
        input.marital_status.as_deref(),
    )?;
    check_choice::<PatientStatus>(input.status.as_deref())?;

    if let Some(contact) = input.contact_number.as_deref() {
        if let Some(existing) = PatientRepo::find_by_contact(&state.pool, contact).await? {
            if existing.id != id {
                return Err(duplicate_contact_error(contact, &existing.name).into());
            }
        }
    }

    let patient = PatientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Patient", id))?;

    tracing::info!(patient_id = id, user_id = auth.user_id, "Patient updated");

    Ok(Json(DataResponse { data: PatientView::new(patient, today) }))
}

/// DELETE /api/v1/patients/{id}
///
/// Admin only: no other role holds `unlink` on patients.
pub async fn delete_patient(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PATIENT, Operation::Unlink)?;
    if !PatientRepo::delete(&state.pool, id).await? {
        return Err(not_found("Patient", id));
    }

    tracing::info!(patient_id = id, user_id = auth.user_id, "Patient deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/patients/{id}/admit
pub async fn admit_patient(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PATIENT, Operation::Write)?;
    let patient = move_patient(&state, id, PatientState::Admitted).await?;

    tracing::info!(patient_id = id, user_id = auth.user_id, "Patient admitted");

    Ok(Json(DataResponse { data: PatientView::new(patient, Utc::now().date_naive()) }))
}

/// POST /api/v1/patients/{id}/discharge
pub async fn discharge_patient(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PATIENT, Operation::Write)?;
    let patient = move_patient(&state, id, PatientState::Discharged).await?;

    tracing::info!(patient_id = id, user_id = auth.user_id, "Patient discharged");

    Ok(Json(DataResponse { data: PatientView::new(patient, Utc::now().date_naive()) }))
}

/// GET /api/v1/patients/{id}/medical-records
pub async fn list_medical_records(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::PATIENT, Operation::Read)?;
    find(&state, id).await?;
    let records = AppointmentRepo::list_medical_records(&state.pool, id).await?;

    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/patients/{id}/vital-signs
pub async fn list_vital_signs(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::VITAL_SIGN, Operation::Read)?;
    find(&state, id).await?;
    let vitals = VitalSignRepo::list_for_patient(&state.pool, id).await?;

    Ok(Json(DataResponse { data: vitals }))
}

async fn find(state: &AppState, id: DbId) -> AppResult<Patient> {
    PatientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Patient", id))
}

async fn move_patient(state: &AppState, id: DbId, to: PatientState) -> AppResult<Patient> {
    let current = find(state, id).await?;
    let from = check_transition(&current.state, to)?;

    PatientRepo::set_state(&state.pool, id, from, to.as_str())
        .await?
        .ok_or_else(|| changed_concurrently("Patient", id))
}

fn validate_details(
    today: Date,
    date_of_birth: Option<Date>,
    contact_number: Option<&str>,
    email: Option<&str>,
    gender: Option<&str>,
    blood_group: Option<&str>,
    marital_status: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(dob) = date_of_birth {
        validate_not_future("Date of birth", dob, today)?;
    }
    if let Some(contact) = contact_number {
        person::validate_contact_number(contact)?;
    }
    person::validate_optional_email(email)?;
    check_choice::<Gender>(gender)?;
    check_choice::<BloodGroup>(blood_group)?;
    check_choice::<MaritalStatus>(marital_status)?;
    Ok(())
}
