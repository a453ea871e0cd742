pub mod donation_requests;
pub mod donors;
pub mod fundings;
pub mod health;
pub mod stats;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the full application route tree.
///
/// Routes are mounted at the root (no version prefix) because the deployed
/// dashboard clients address them that way:
///
/// ```text
/// POST   /donation-requests                       create (auth, active)
/// GET    /donation-requests/my-requests/{email}   owner listing (paged)
/// GET    /donation-requests/recent/{email}        owner recent widget
/// PATCH  /donation-requests/donate/{id}           claim (auth, not owner)
/// PATCH  /donation-requests/status/{id}           done/canceled flip
/// DELETE /donation-requests/{id}                  delete (owner/admin)
/// GET    /donation-request/{id}                   public read
/// PATCH  /update-donation-request/{id}            owner field edit
/// GET    /all-pending-requests                    public board
/// GET    /all-active-operations                   active view (auth, paged)
/// GET    /all-donation-requests                   staff view (paged)
///
/// POST   /users                                   registration upsert
/// GET    /users?status=                           registry view (admin)
/// GET    /users/{email}                           profile (owner/admin)
/// PATCH  /users/{email}                           profile edit (owner)
/// GET    /users/admin/{email}                     role probe (self)
/// PATCH  /users/role/{id}                         set role (admin, not self)
/// PATCH  /users/status/{id}                       block/unblock (admin, not self)
///
/// GET    /donor-search                            public donor search
/// GET    /admin-stats                             admin counters
/// GET    /system-statistics                       public statistics
/// GET    /blood-stock                             stock gauges (auth)
/// GET    /fundings                                funding list (auth)
/// POST   /fundings                                record capture (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(donation_requests::router())
        .merge(users::router())
        .merge(donors::router())
        .merge(stats::router())
        .merge(fundings::router())
}
