//! Shared query parameter types for API handlers.
//!
//! Status filters arrive as strings because every client sends `all` to
//! mean "no filter"; [`parse_status_filter`] centralizes that convention.

use hemolink_core::lifecycle::RequestStatus;
use hemolink_core::roles::UserStatus;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Bare pagination (`?page=&size=`). Both optional; the public pending
/// board returns the full list when neither is supplied.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// Pagination plus optional status filter (`?page=&size=&status=`).
/// `page` is 0-based; values are clamped via `hemolink_core::pagination`.
#[derive(Debug, Deserialize)]
pub struct PagedStatusParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<String>,
}

/// Pagination plus optional blood-group filter for the active-operations
/// view (`?page=&size=&bloodGroup=`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveOpsParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub blood_group: Option<String>,
}

/// Donor search filters (`?bloodGroup=&district=&upazila=`). All three are
/// required; an empty filter set is rejected, never treated as a wildcard.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorSearchParams {
    pub blood_group: Option<String>,
    pub district: Option<String>,
    pub upazila: Option<String>,
}

/// User registry filter (`?status=all|active|blocked`).
#[derive(Debug, Deserialize)]
pub struct UserStatusParams {
    pub status: Option<String>,
}

/// Parse a request-status filter string. `None`, empty, and `"all"` mean
/// no filter; anything else must be a valid status.
pub fn parse_status_filter(raw: Option<&str>) -> AppResult<Option<RequestStatus>> {
    match raw {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => serde_json::from_value(serde_json::Value::String(value.to_string()))
            .map(Some)
            .map_err(|_| {
                AppError::BadRequest(format!("unknown status filter: {value}"))
            }),
    }
}

/// Parse a user-status filter string with the same `all` convention.
pub fn parse_user_status_filter(raw: Option<&str>) -> AppResult<Option<UserStatus>> {
    match raw {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => serde_json::from_value(serde_json::Value::String(value.to_string()))
            .map(Some)
            .map_err(|_| {
                AppError::BadRequest(format!("unknown status filter: {value}"))
            }),
    }
}
