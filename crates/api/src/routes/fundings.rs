//! Route definitions for funding records.

use axum::routing::get;
use axum::Router;

use crate::handlers::fundings;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/fundings",
        get(fundings::list_fundings).post(fundings::create_funding),
    )
}
