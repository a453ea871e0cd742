//! Route definition for the public donor search.

use axum::routing::get;
use axum::Router;

use crate::handlers::donors;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/donor-search", get(donors::donor_search))
}
