//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller's identity from a JWT Bearer token.
//! - [`rbac::CurrentUser`] -- Identity plus the caller's registry row, loaded fresh per request.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireStaff`] -- Requires `volunteer` or `admin` role.

pub mod auth;
pub mod rbac;
