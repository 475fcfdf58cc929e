//! Admin gate for the routes the per-entity matrix does not cover: sequence
//! counters, on-demand job runs and doctor records.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use regsuite_core::acl::ROLE_ADMIN;
use regsuite_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An authenticated caller holding the `admin` role. Any other role gets a
/// 403 with code `FORBIDDEN`; a missing or bad token is still a 401.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role == ROLE_ADMIN {
            return Ok(RequireAdmin(user));
        }
        tracing::debug!(
            user_id = user.user_id,
            role = %user.role,
            path = %parts.uri.path(),
            "Admin route refused"
        );
        Err(CoreError::Forbidden(format!(
            "Role '{}' cannot use this endpoint; admin required",
            user.role
        ))
        .into())
    }
}
