//! Handlers for the user registry.
//!
//! Registration is the public first-touch upsert; everything else is
//! guarded by ownership or the admin-only/self-action rules in
//! `hemolink_core::access`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hemolink_core::access;
use hemolink_core::error::CoreError;
use hemolink_core::roles::{Role, UserStatus};
use hemolink_core::types::DbId;
use hemolink_db::models::user::{RegisterUser, UpdateProfile, User};
use hemolink_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{CurrentUser, RequireAdmin};
use crate::query::{parse_user_status_filter, UserStatusParams};
use crate::response::{Inserted, Modified};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request/response types
// ---------------------------------------------------------------------------

/// Request body for `PATCH /users/role/{id}`. An out-of-enum role is
/// rejected at deserialization.
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: Role,
}

/// Request body for `PATCH /users/status/{id}`.
#[derive(Debug, Deserialize)]
pub struct SetUserStatusRequest {
    pub status: UserStatus,
}

/// Response for the `GET /users/admin/{email}` role probe.
#[derive(Debug, Serialize)]
pub struct IsAdminResponse {
    pub admin: bool,
}

/// Profile fields the owner may never touch. Checked explicitly so the
/// caller gets a `Forbidden` rather than a silently dropped field.
const PROTECTED_PROFILE_FIELDS: &[&str] = &["email", "role", "status"];

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /users
///
/// First-registration upsert keyed by email. Role and status always start
/// at the table defaults (`donor` / `active`); a repeat registration
/// returns the existing row untouched.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<Inserted>)> {
    input.validate()?;

    let user = UserRepo::register(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(Inserted { inserted_id: user.id })))
}

/// GET /users?status=all|active|blocked
///
/// Registry view for the admin dashboard.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<UserStatusParams>,
) -> AppResult<Json<Vec<User>>> {
    let status = parse_user_status_filter(params.status.as_deref())?;
    let users = UserRepo::list_by_status(&state.pool, status).await?;
    Ok(Json(users))
}

/// GET /users/{email}
///
/// A user record; owner or admin.
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(email): Path<String>,
) -> AppResult<Json<User>> {
    if actor.email != email && actor.role != Role::Admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "only the owner or an admin may read this profile".into(),
        )));
    }

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::EmailNotFound(email)))?;
    Ok(Json(user))
}

/// PATCH /users/{email}
///
/// Owner-only profile merge. Payloads naming `email`, `role`, or `status`
/// fail `Forbidden` instead of being silently ignored.
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(email): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<Json<User>> {
    if actor.email != email {
        return Err(AppError::Core(CoreError::Forbidden(
            "only the owner may edit this profile".into(),
        )));
    }

    if let Some(object) = payload.as_object() {
        for field in PROTECTED_PROFILE_FIELDS {
            if object.contains_key(*field) {
                return Err(AppError::Core(CoreError::Forbidden(format!(
                    "{field} cannot be changed through profile updates"
                ))));
            }
        }
    }

    let input: UpdateProfile = serde_json::from_value(payload)
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let user = UserRepo::update_profile(&state.pool, &email, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::EmailNotFound(email)))?;
    Ok(Json(user))
}

/// GET /users/admin/{email}
///
/// Role probe used by the dashboard shell. Callers may only probe their own
/// email.
pub async fn is_admin(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(email): Path<String>,
) -> AppResult<Json<IsAdminResponse>> {
    if caller.email != email {
        return Err(AppError::Core(CoreError::Forbidden(
            "callers may only probe their own role".into(),
        )));
    }

    let user = UserRepo::find_by_email(&state.pool, &email).await?;
    let admin = user.is_some_and(|u| u.role == Role::Admin);
    Ok(Json(IsAdminResponse { admin }))
}

/// PATCH /users/role/{id}
///
/// Admin-only role change; an admin can never change their own role.
pub async fn set_role(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<SetRoleRequest>,
) -> AppResult<Json<Modified>> {
    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    access::can_mutate_user(actor.role, &actor.email, &target.email)?;

    let modified_count = UserRepo::set_role(&state.pool, id, input.role).await?;
    Ok(Json(Modified { modified_count }))
}

/// PATCH /users/status/{id}
///
/// Admin-only block/unblock; same self-action rule as role changes.
pub async fn set_status(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<SetUserStatusRequest>,
) -> AppResult<Json<Modified>> {
    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    access::can_mutate_user(actor.role, &actor.email, &target.email)?;

    let modified_count = UserRepo::set_status(&state.pool, id, input.status).await?;
    Ok(Json(Modified { modified_count }))
}
