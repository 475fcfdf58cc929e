//! Handlers for activities attached to records.
//!
//! Reading or closing an activity needs the same access as the record it is
//! attached to. Listing across every record type is admin-only.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{Operation, ROLE_ADMIN};
use regsuite_core::error::CoreError;
use regsuite_core::types::DbId;
use regsuite_db::models::activity::ActivityListParams;
use regsuite_db::repositories::ActivityRepo;

use super::not_found;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::page;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/activities
pub async fn list_activities(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ActivityListParams>,
) -> AppResult<impl IntoResponse> {
    match params.entity_type.as_deref() {
        Some(entity_type) => auth.authorize(entity_type, Operation::Read)?,
        None if auth.role == ROLE_ADMIN => {}
        None => {
            return Err(CoreError::Forbidden(
                "Filter by entity_type to list activities".into(),
            )
            .into());
        }
    }
    let (limit, offset) = page(params.limit, params.offset);
    let activities = ActivityRepo::list(&state.pool, &params, limit, offset).await?;

    Ok(Json(DataResponse { data: activities }))
}

/// POST /api/v1/activities/{id}/done
pub async fn mark_activity_done(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let activity = ActivityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Activity", id))?;
    auth.authorize(&activity.entity_type, Operation::Write)?;

    let activity = ActivityRepo::mark_done(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Activity", id))?;

    tracing::info!(
        activity_id = id,
        entity_type = %activity.entity_type,
        entity_id = activity.entity_id,
        user_id = auth.user_id,
        "Activity marked done",
    );

    Ok(Json(DataResponse { data: activity }))
}
