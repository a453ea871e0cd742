//! Handlers for funding records.
//!
//! Payment capture happens with the external payment collaborator; this
//! surface only records its write-once output and lists it back.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use hemolink_db::models::funding::{CreateFunding, Funding};
use hemolink_db::repositories::FundingRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::Inserted;
use crate::state::AppState;

/// GET /fundings
///
/// All funding records, most recent first.
pub async fn list_fundings(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> AppResult<Json<Vec<Funding>>> {
    let fundings = FundingRepo::list(&state.pool).await?;
    Ok(Json(fundings))
}

/// POST /fundings
///
/// Record a captured payment. The unique transaction id makes repeat
/// captures a 409 instead of a duplicate row.
pub async fn create_funding(
    State(state): State<AppState>,
    _caller: AuthUser,
    Json(input): Json<CreateFunding>,
) -> AppResult<(StatusCode, Json<Inserted>)> {
    input.validate()?;

    let funding = FundingRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(Inserted { inserted_id: funding.id })))
}
