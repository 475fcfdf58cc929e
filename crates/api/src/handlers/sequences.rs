//! Admin handlers for identifier counters.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::sequence::validate_definition;
use regsuite_db::models::sequence::UpdateSequence;
use regsuite_db::repositories::SequenceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/sequences
pub async fn list_sequences(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let sequences = SequenceRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: sequences }))
}

/// PUT /api/v1/admin/sequences/{code}
///
/// Changes the format of future identifiers. The next number is never
/// rewound.
pub async fn update_sequence(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(input): Json<UpdateSequence>,
) -> AppResult<impl IntoResponse> {
    let current = SequenceRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Unknown sequence '{code}'")))?;
    validate_definition(
        input.prefix.as_deref().unwrap_or(&current.prefix),
        input.padding.unwrap_or(current.padding),
        input.number_increment.unwrap_or(current.number_increment),
    )?;

    let sequence = SequenceRepo::update(&state.pool, current.id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Unknown sequence '{code}'")))?;

    tracing::info!(code = %sequence.code, prefix = %sequence.prefix, user_id = admin.user_id, "Sequence updated");

    Ok(Json(DataResponse { data: sequence }))
}
