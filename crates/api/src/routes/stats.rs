//! Route definitions for the statistics views.

use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin-stats", get(stats::admin_stats))
        .route("/system-statistics", get(stats::system_statistics))
        .route("/blood-stock", get(stats::blood_stock))
}
