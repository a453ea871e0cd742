//! Handlers for the donation-request lifecycle and its listings.
//!
//! Authorization is decided per request from freshly loaded registry rows
//! (via [`CurrentUser`]) and the pure predicates in `hemolink_core::access`;
//! the handlers orchestrate guard -> repository and map outcomes to the
//! envelopes the dashboard clients consume.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hemolink_core::access;
use hemolink_core::error::CoreError;
use hemolink_core::lifecycle::{transition, LifecycleEvent, RequestStatus};
use hemolink_core::pagination::{clamp_size, page_offset};
use hemolink_core::types::DbId;
use hemolink_db::models::donation_request::{
    CreateDonationRequest, DonationRequest, UpdateDonationRequest,
};
use hemolink_db::repositories::DonationRequestRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{CurrentUser, RequireStaff};
use crate::query::{parse_status_filter, ActiveOpsParams, PagedStatusParams, PageParams};
use crate::response::{Deleted, Inserted, Modified, Paginated};
use crate::state::AppState;

/// How many rows the dashboard-home recent widget shows.
const RECENT_LIMIT: i64 = 3;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PATCH /donation-requests/status/{id}`.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: RequestStatus,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /donation-requests
///
/// Create a `pending` request owned by the caller. Blocked callers are
/// refused before the insert.
pub async fn create_request(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CreateDonationRequest>,
) -> AppResult<(StatusCode, Json<Inserted>)> {
    input.validate()?;
    access::can_create_request(user.status)?;

    let request =
        DonationRequestRepo::create(&state.pool, &user.name, &user.email, &input).await?;

    Ok((StatusCode::CREATED, Json(Inserted { inserted_id: request.id })))
}

/// GET /donation-requests/my-requests/{email}?page&size&status
///
/// One page of the owner's requests, most recent first. Owner or admin.
pub async fn my_requests(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(email): Path<String>,
    Query(params): Query<PagedStatusParams>,
) -> AppResult<Json<Paginated<DonationRequest>>> {
    if user.email != email && user.role != hemolink_core::roles::Role::Admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "only the owner or an admin may list these requests".into(),
        )));
    }

    let status = parse_status_filter(params.status.as_deref())?;
    let size = clamp_size(params.size);
    let offset = page_offset(params.page, size);

    let result =
        DonationRequestRepo::list_by_requester(&state.pool, &email, status, size, offset).await?;
    let count = DonationRequestRepo::count_by_requester(&state.pool, &email, status).await?;

    Ok(Json(Paginated { result, count }))
}

/// GET /donation-requests/recent/{email}
///
/// The owner's three most recent requests for the dashboard home.
pub async fn recent_requests(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<DonationRequest>>> {
    if user.email != email && user.role != hemolink_core::roles::Role::Admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "only the owner or an admin may list these requests".into(),
        )));
    }

    let result = DonationRequestRepo::recent_by_requester(&state.pool, &email, RECENT_LIMIT).await?;
    Ok(Json(result))
}

/// GET /all-pending-requests
///
/// The public "requests needing help" board. Unpaginated today, but
/// `?page&size` are honoured when supplied.
pub async fn all_pending(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Vec<DonationRequest>>> {
    let (limit, offset) = if params.page.is_some() || params.size.is_some() {
        let size = clamp_size(params.size);
        (Some(size), page_offset(params.page, size))
    } else {
        (None, 0)
    };

    let result = DonationRequestRepo::list_pending(&state.pool, limit, offset).await?;
    Ok(Json(result))
}

/// GET /all-active-operations?page&size&bloodGroup
///
/// Paginated view of `pending` and `inprogress` requests for authenticated
/// callers, optionally filtered by blood group.
pub async fn all_active_operations(
    State(state): State<AppState>,
    _caller: AuthUser,
    Query(params): Query<ActiveOpsParams>,
) -> AppResult<Json<Paginated<DonationRequest>>> {
    let blood_group = match params.blood_group.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            raw.parse()
                .map_err(|e: String| AppError::Core(CoreError::Validation(e)))?,
        ),
    };
    let size = clamp_size(params.size);
    let offset = page_offset(params.page, size);

    let result = DonationRequestRepo::list_active(&state.pool, blood_group, size, offset).await?;
    let count = DonationRequestRepo::count_active(&state.pool, blood_group).await?;

    Ok(Json(Paginated { result, count }))
}

/// GET /all-donation-requests?page&size&status
///
/// Global request view for volunteers and admins.
pub async fn all_requests(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(params): Query<PagedStatusParams>,
) -> AppResult<Json<Paginated<DonationRequest>>> {
    let status = parse_status_filter(params.status.as_deref())?;
    let size = clamp_size(params.size);
    let offset = page_offset(params.page, size);

    let result = DonationRequestRepo::list_all(&state.pool, status, size, offset).await?;
    let count = DonationRequestRepo::count_all(&state.pool, status).await?;

    Ok(Json(Paginated { result, count }))
}

/// GET /donation-request/{id}
///
/// Public read of a single request.
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DonationRequest>> {
    let request = DonationRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DonationRequest",
            id,
        }))?;
    Ok(Json(request))
}

/// PATCH /update-donation-request/{id}
///
/// Requester-only edit of descriptive fields. Status and donor columns are
/// untouched regardless of payload.
pub async fn update_request(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDonationRequest>,
) -> AppResult<Json<Modified>> {
    let request = DonationRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DonationRequest",
            id,
        }))?;

    access::can_edit_request_fields(&user.email, &request.requester_email)?;

    let modified_count = DonationRequestRepo::update_fields(&state.pool, id, &input).await?;
    if modified_count == 0 {
        // The row was deleted between our read and the update.
        return Err(AppError::Core(CoreError::Conflict(
            "request was deleted concurrently".into(),
        )));
    }
    Ok(Json(Modified { modified_count }))
}

/// PATCH /donation-requests/donate/{id}
///
/// The claim. Donor identity comes from the authenticated caller, never the
/// payload. The response is the envelope the clients already poll:
/// `modifiedCount: 1` on success, `modifiedCount: 0` when the claim lost
/// the race (the request was taken or withdrawn concurrently).
pub async fn claim_request(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Modified>> {
    let request = DonationRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DonationRequest",
            id,
        }))?;

    // Cheap short-circuit; the exclusivity guarantee is the conditional
    // update below.
    match access::can_claim(user.status, &user.email, &request.requester_email, request.status) {
        Err(CoreError::AlreadyClaimed) => {
            return Ok(Json(Modified { modified_count: 0 }));
        }
        other => other?,
    }

    let modified_count =
        DonationRequestRepo::claim(&state.pool, id, &user.name, &user.email).await?;
    if modified_count == 0 {
        // Expected under concurrent claims; never an error-level event.
        tracing::debug!(request_id = id, donor = %user.email, "claim lost the race");
    }

    Ok(Json(Modified { modified_count }))
}

/// PATCH /donation-requests/status/{id}
///
/// Flip an `inprogress` request to `done` or `canceled`. Requester,
/// volunteer, or admin.
pub async fn set_request_status(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<Modified>> {
    let request = DonationRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DonationRequest",
            id,
        }))?;

    access::can_mutate_request(user.role, &user.email, &request.requester_email)?;

    let event = match input.status {
        RequestStatus::Done => LifecycleEvent::MarkDone,
        RequestStatus::Canceled => LifecycleEvent::MarkCanceled,
        other => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "status can only be set to done or canceled, not {other:?}"
            ))));
        }
    };
    let next = transition(request.status, event)?;

    let modified_count = DonationRequestRepo::set_terminal_status(&state.pool, id, next).await?;
    if modified_count == 0 {
        // The request left `inprogress` between our read and the update.
        return Err(AppError::Core(CoreError::Conflict(
            "request status changed concurrently".into(),
        )));
    }

    Ok(Json(Modified { modified_count }))
}

/// DELETE /donation-requests/{id}
///
/// Remove a request in any status. Requester or admin.
pub async fn delete_request(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Deleted>> {
    let request = DonationRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DonationRequest",
            id,
        }))?;

    access::can_delete_request(user.role, &user.email, &request.requester_email)?;

    let deleted_count = DonationRequestRepo::delete(&state.pool, id).await?;
    Ok(Json(Deleted { deleted_count }))
}
