//! Handlers for network sites (towers, exchanges, data centres).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::operator::{validate_coordinates, SiteType};
use regsuite_core::types::DbId;
use regsuite_db::models::site::{CreateSite, SiteListParams, UpdateSite};
use regsuite_db::repositories::SiteRepo;

use super::{check_choice, not_found};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::page;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/sites
pub async fn list_sites(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SiteListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::SITE, Operation::Read)?;
    let (limit, offset) = page(params.limit, params.offset);
    let sites = SiteRepo::list(&state.pool, &params, limit, offset).await?;

    Ok(Json(DataResponse { data: sites }))
}

/// POST /api/v1/sites
pub async fn create_site(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSite>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::SITE, Operation::Create)?;
    check_choice::<SiteType>(input.site_type.as_deref())?;
    validate_coordinates(input.latitude, input.longitude)?;

    let site = SiteRepo::create(&state.pool, &input).await?;

    tracing::info!(site_id = site.id, site_code = %site.site_code, user_id = auth.user_id, "Site created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: site })))
}

/// GET /api/v1/sites/{id}
pub async fn get_site(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::SITE, Operation::Read)?;
    let site = SiteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Site", id))?;

    Ok(Json(DataResponse { data: site }))
}

/// PUT /api/v1/sites/{id}
pub async fn update_site(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSite>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::SITE, Operation::Write)?;
    check_choice::<SiteType>(input.site_type.as_deref())?;
    validate_coordinates(input.latitude, input.longitude)?;

    let site = SiteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Site", id))?;

    tracing::info!(site_id = id, user_id = auth.user_id, "Site updated");

    Ok(Json(DataResponse { data: site }))
}

/// DELETE /api/v1/sites/{id}
pub async fn delete_site(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::SITE, Operation::Unlink)?;
    if !SiteRepo::delete(&state.pool, id).await? {
        return Err(not_found("Site", id));
    }

    tracing::info!(site_id = id, user_id = auth.user_id, "Site deleted");

    Ok(StatusCode::NO_CONTENT)
}
