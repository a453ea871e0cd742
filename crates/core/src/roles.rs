//! User role and account-status enums.
//!
//! Both map to PostgreSQL enum types created in
//! `20260301000001_create_enum_types.sql`. Unknown values are rejected at
//! deserialization, so handlers never see an out-of-enum role or status.

use serde::{Deserialize, Serialize};

/// A user's role. Every registered user starts as `donor`; only an admin
/// can promote to `volunteer` or `admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Donor,
    Volunteer,
    Admin,
}

impl Role {
    /// Volunteers and admins may act on requests they do not own.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Volunteer | Role::Admin)
    }
}

/// Account status. Blocking suspends request creation while leaving the
/// user's existing data visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Blocked,
}
