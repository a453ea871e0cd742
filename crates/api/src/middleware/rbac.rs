//! Role-based access control (RBAC) extractors.
//!
//! [`CurrentUser`] resolves the authenticated caller to their registry row
//! with a fresh lookup on every request — no role flag outlives a single
//! request, so an admin's block or demotion takes effect immediately.
//! [`RequireAdmin`] and [`RequireStaff`] wrap it to enforce a minimum role
//! at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hemolink_core::error::CoreError;
use hemolink_db::models::user::User;
use hemolink_db::repositories::UserRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller's registry row.
///
/// Rejects with 401 if the token's email has no registered user -- a valid
/// token for an unregistered identity cannot act on anything.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = AuthUser::from_request_parts(parts, state).await?;
        let user = UserRepo::find_by_email(&state.pool, &identity.email)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Token subject is not a registered user".into(),
                ))
            })?;
        Ok(CurrentUser(user))
    }
}

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.role != hemolink_core::roles::Role::Admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `volunteer` or `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireStaff(pub User);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.role.is_staff() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Volunteer or Admin role required".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}
