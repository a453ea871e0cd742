//! Handler for the public donor search.

use axum::extract::{Query, State};
use axum::Json;
use hemolink_core::blood::BloodGroup;
use hemolink_core::error::CoreError;
use hemolink_db::models::user::User;
use hemolink_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::query::DonorSearchParams;
use crate::state::AppState;

/// GET /donor-search?bloodGroup&district&upazila
///
/// Active donors matching all three filters. The search form requires every
/// field, so an empty filter is a validation error, never a wildcard.
pub async fn donor_search(
    State(state): State<AppState>,
    Query(params): Query<DonorSearchParams>,
) -> AppResult<Json<Vec<User>>> {
    let blood_group: BloodGroup = match params.blood_group.as_deref() {
        None | Some("") => {
            return Err(AppError::Core(CoreError::Validation(
                "bloodGroup is required".into(),
            )));
        }
        Some(raw) => raw
            .parse()
            .map_err(|e: String| AppError::Core(CoreError::Validation(e)))?,
    };
    let district = match params.district.as_deref() {
        None | Some("") => {
            return Err(AppError::Core(CoreError::Validation(
                "district is required".into(),
            )));
        }
        Some(value) => value,
    };
    let upazila = match params.upazila.as_deref() {
        None | Some("") => {
            return Err(AppError::Core(CoreError::Validation(
                "upazila is required".into(),
            )));
        }
        Some(value) => value,
    };

    let donors = UserRepo::search_donors(&state.pool, blood_group, district, upazila).await?;
    Ok(Json(donors))
}
