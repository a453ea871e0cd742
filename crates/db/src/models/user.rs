//! User entity model and DTOs.

use hemolink_core::blood::BloodGroup;
use hemolink_core::roles::{Role, UserStatus};
use hemolink_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Serialized camelCase because the dashboard clients consume these fields
/// directly. There is nothing secret in a user row — identity credentials
/// live with the external identity provider, not here.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub blood_group: BloodGroup,
    pub district: String,
    pub upazila: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for first-registration upsert. Role and status are never taken from
/// the caller; they default to `donor` / `active` in the table.
#[derive(Debug, Deserialize, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub avatar_url: Option<String>,
    pub blood_group: BloodGroup,
    pub district: String,
    pub upazila: String,
}

/// DTO for owner profile edits. Only these fields are mergeable; `email`,
/// `role`, and `status` are deliberately absent so a payload cannot touch
/// them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub district: Option<String>,
    pub upazila: Option<String>,
}
