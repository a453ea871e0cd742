//! Route definitions for the donation-request resource.

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers::donation_requests;
use crate::state::AppState;

/// Donation-request routes. Authorization is enforced by handler
/// extractors and the access predicates, not here.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/donation-requests", post(donation_requests::create_request))
        .route(
            "/donation-requests/my-requests/{email}",
            get(donation_requests::my_requests),
        )
        .route(
            "/donation-requests/recent/{email}",
            get(donation_requests::recent_requests),
        )
        .route(
            "/donation-requests/donate/{id}",
            patch(donation_requests::claim_request),
        )
        .route(
            "/donation-requests/status/{id}",
            patch(donation_requests::set_request_status),
        )
        .route(
            "/donation-requests/{id}",
            delete(donation_requests::delete_request),
        )
        .route("/donation-request/{id}", get(donation_requests::get_request))
        .route(
            "/update-donation-request/{id}",
            patch(donation_requests::update_request),
        )
        .route("/all-pending-requests", get(donation_requests::all_pending))
        .route(
            "/all-active-operations",
            get(donation_requests::all_active_operations),
        )
        .route(
            "/all-donation-requests",
            get(donation_requests::all_requests),
        )
}
