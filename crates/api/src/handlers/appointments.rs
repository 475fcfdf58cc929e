//! Handlers for appointments and their consultation lifecycle.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::activity::ActivityType;
use regsuite_core::error::CoreError;
use regsuite_core::hospital::appointment::{
    reminder_due_date, validate_duration, AppointmentState, Priority,
};
use regsuite_core::types::DbId;
use regsuite_db::models::appointment::{
    Appointment, AppointmentListParams, AppointmentView, BulkConfirm, CreateAppointment,
    UpdateAppointment,
};
use regsuite_db::repositories::{AppointmentRepo, DoctorRepo};
use regsuite_events::bus::APPOINTMENT_CONFIRMED;
use regsuite_events::RecordEvent;
use serde::Serialize;

use super::{changed_concurrently, check_choice, check_transition, not_found};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::page;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/appointments
pub async fn list_appointments(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AppointmentListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::APPOINTMENT, Operation::Read)?;
    let (limit, offset) = page(params.limit, params.offset);

    let appointments: Vec<AppointmentView> =
        AppointmentRepo::list(&state.pool, &params, limit, offset)
            .await?
            .into_iter()
            .map(AppointmentView::from)
            .collect();

    Ok(Json(DataResponse { data: appointments }))
}

/// POST /api/v1/appointments
pub async fn create_appointment(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAppointment>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::APPOINTMENT, Operation::Create)?;
    if let Some(duration) = input.duration {
        validate_duration(duration)?;
    }
    check_choice::<Priority>(input.priority.as_deref())?;
    if input.reason.trim().is_empty() {
        return Err(CoreError::Validation("Reason is required".into()).into());
    }

    let appointment = AppointmentRepo::create(&state.pool, &input).await?;

    tracing::info!(
        appointment_id = appointment.id,
        reference = %appointment.reference,
        user_id = auth.user_id,
        "Appointment booked",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: AppointmentView::from(appointment) })))
}

/// GET /api/v1/appointments/{id}
pub async fn get_appointment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::APPOINTMENT, Operation::Read)?;
    let appointment = find(&state, id).await?;

    Ok(Json(DataResponse { data: AppointmentView::from(appointment) }))
}

/// PUT /api/v1/appointments/{id}
pub async fn update_appointment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAppointment>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::APPOINTMENT, Operation::Write)?;
    if let Some(duration) = input.duration {
        validate_duration(duration)?;
    }
    check_choice::<Priority>(input.priority.as_deref())?;

    let appointment = AppointmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Appointment", id))?;

    tracing::info!(appointment_id = id, user_id = auth.user_id, "Appointment updated");

    Ok(Json(DataResponse { data: AppointmentView::from(appointment) }))
}

/// POST /api/v1/appointments/confirm
///
/// Confirm every listed draft appointment. All of them must be drafts;
/// otherwise nothing is confirmed. Each confirmation schedules a reminder
/// for the doctor the day before the appointment.
pub async fn confirm_appointments(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkConfirm>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::APPOINTMENT, Operation::Write)?;
    if input.ids.is_empty() {
        return Err(AppError::BadRequest("No appointments selected".into()));
    }

    let mut pending = Vec::with_capacity(input.ids.len());
    for &id in &input.ids {
        let current = find(&state, id).await?;
        let from = check_transition(&current.state, AppointmentState::Confirmed)?;
        pending.push((current, from));
    }

    let mut confirmed = Vec::with_capacity(pending.len());
    for (current, from) in pending {
        let appointment = AppointmentRepo::set_state(
            &state.pool,
            current.id,
            from,
            AppointmentState::Confirmed.as_str(),
        )
        .await?
        .ok_or_else(|| changed_concurrently("Appointment", current.id))?;

        let doctor_login = DoctorRepo::find_by_id(&state.pool, appointment.doctor_id)
            .await?
            .and_then(|d| d.user_login);
        state.event_bus.publish(
            RecordEvent::new(
                APPOINTMENT_CONFIRMED,
                entity::APPOINTMENT,
                appointment.id,
                format!("Appointment Reminder: {}", appointment.reference),
            )
            .with_activity_type(ActivityType::Reminder)
            .with_assignee(doctor_login)
            .with_due_date(reminder_due_date(appointment.appointment_date))
            .with_actor(auth.user_id),
        );

        tracing::info!(appointment_id = appointment.id, user_id = auth.user_id, "Appointment confirmed");
        confirmed.push(AppointmentView::from(appointment));
    }

    Ok(Json(DataResponse { data: confirmed }))
}

/// POST /api/v1/appointments/{id}/start
pub async fn start_consultation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::APPOINTMENT, Operation::Write)?;
    let appointment = move_appointment(&state, id, AppointmentState::InConsultation).await?;

    tracing::info!(appointment_id = id, user_id = auth.user_id, "Consultation started");

    Ok(Json(DataResponse { data: AppointmentView::from(appointment) }))
}

/// Completed appointment together with the medical record it produced.
#[derive(Debug, Serialize)]
pub struct CompletedAppointment {
    pub appointment: AppointmentView,
    pub medical_record: regsuite_db::models::appointment::MedicalRecord,
}

/// POST /api/v1/appointments/{id}/complete
///
/// Ends the consultation and writes the patient's medical record from the
/// appointment's symptoms, diagnosis and notes.
pub async fn complete_appointment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::APPOINTMENT, Operation::Write)?;
    let current = find(&state, id).await?;
    check_transition(&current.state, AppointmentState::Done)?;

    let (appointment, medical_record) = AppointmentRepo::complete(&state.pool, id)
        .await?
        .ok_or_else(|| changed_concurrently("Appointment", id))?;

    tracing::info!(
        appointment_id = id,
        medical_record_id = medical_record.id,
        user_id = auth.user_id,
        "Appointment completed",
    );

    Ok(Json(DataResponse {
        data: CompletedAppointment {
            appointment: AppointmentView::from(appointment),
            medical_record,
        },
    }))
}

/// POST /api/v1/appointments/{id}/cancel
pub async fn cancel_appointment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::APPOINTMENT, Operation::Write)?;
    let appointment = move_appointment(&state, id, AppointmentState::Cancelled).await?;

    tracing::info!(appointment_id = id, user_id = auth.user_id, "Appointment cancelled");

    Ok(Json(DataResponse { data: AppointmentView::from(appointment) }))
}

async fn find(state: &AppState, id: DbId) -> AppResult<Appointment> {
    AppointmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Appointment", id))
}

async fn move_appointment(
    state: &AppState,
    id: DbId,
    to: AppointmentState,
) -> AppResult<Appointment> {
    let current = find(state, id).await?;
    let from = check_transition(&current.state, to)?;

    AppointmentRepo::set_state(&state.pool, id, from, to.as_str())
        .await?
        .ok_or_else(|| changed_concurrently("Appointment", id))
}
