//! Handlers for emergency room cases.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::error::CoreError;
use regsuite_core::hospital::emergency::{EmergencyState, TriageLevel};
use regsuite_core::lifecycle::parse_state;
use regsuite_core::types::DbId;
use regsuite_db::models::emergency::{
    CreateEmergencyCase, EmergencyCase, EmergencyListParams, EmergencyTransition,
    UpdateEmergencyCase,
};
use regsuite_db::repositories::{DoctorRepo, EmergencyRepo};
use regsuite_events::bus::EMERGENCY_IN_TREATMENT;
use regsuite_events::RecordEvent;

use super::{changed_concurrently, check_choice, check_transition, not_found};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::page;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/emergency-cases
pub async fn list_cases(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<EmergencyListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::EMERGENCY, Operation::Read)?;
    let (limit, offset) = page(params.limit, params.offset);
    let cases = EmergencyRepo::list(&state.pool, &params, limit, offset).await?;

    Ok(Json(DataResponse { data: cases }))
}

/// POST /api/v1/emergency-cases
pub async fn create_case(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateEmergencyCase>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::EMERGENCY, Operation::Create)?;
    input.triage_level.parse::<TriageLevel>()?;
    if input.chief_complaint.trim().is_empty() {
        return Err(CoreError::Validation("Chief complaint is required".into()).into());
    }

    let case = EmergencyRepo::create(&state.pool, &input).await?;

    tracing::info!(
        case_id = case.id,
        reference = %case.reference,
        triage_level = %case.triage_level,
        user_id = auth.user_id,
        "Emergency case registered",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: case })))
}

/// GET /api/v1/emergency-cases/{id}
pub async fn get_case(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::EMERGENCY, Operation::Read)?;
    let case = find(&state, id).await?;

    Ok(Json(DataResponse { data: case }))
}

/// PUT /api/v1/emergency-cases/{id}
pub async fn update_case(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEmergencyCase>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::EMERGENCY, Operation::Write)?;
    check_choice::<TriageLevel>(input.triage_level.as_deref())?;

    let case = EmergencyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Emergency case", id))?;

    tracing::info!(case_id = id, user_id = auth.user_id, "Emergency case updated");

    Ok(Json(DataResponse { data: case }))
}

/// POST /api/v1/emergency-cases/{id}/transition
///
/// Move the case along its lifecycle. Starting treatment stamps the start
/// time and notifies the assigned doctor; discharge stamps the discharge
/// time.
pub async fn transition_case(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<EmergencyTransition>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::EMERGENCY, Operation::Write)?;
    let to: EmergencyState = parse_state(&input.state)?;

    let current = find(&state, id).await?;
    let from = check_transition(&current.state, to)?;

    let case = EmergencyRepo::set_state(&state.pool, id, from, to.as_str())
        .await?
        .ok_or_else(|| changed_concurrently("Emergency case", id))?;

    if to == EmergencyState::InTreatment {
        if let Some(doctor_id) = case.assigned_doctor_id {
            let doctor_login = DoctorRepo::find_by_id(&state.pool, doctor_id)
                .await?
                .and_then(|d| d.user_login);
            state.event_bus.publish(
                RecordEvent::new(
                    EMERGENCY_IN_TREATMENT,
                    entity::EMERGENCY,
                    case.id,
                    format!("Emergency case {} is now in treatment", case.reference),
                )
                .with_assignee(doctor_login)
                .with_actor(auth.user_id)
                .with_payload(serde_json::json!({
                    "triage_level": case.triage_level,
                    "target_minutes": parse_state::<TriageLevel>(&case.triage_level)
                        .ok()
                        .and_then(TriageLevel::target_minutes),
                })),
            );
        }
    }

    tracing::info!(
        case_id = id,
        from,
        to = %to,
        closed = to.closes_case(),
        user_id = auth.user_id,
        "Emergency case moved",
    );

    Ok(Json(DataResponse { data: case }))
}

async fn find(state: &AppState, id: DbId) -> AppResult<EmergencyCase> {
    EmergencyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Emergency case", id))
}
