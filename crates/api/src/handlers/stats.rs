//! Handlers for the derived statistics views.

use axum::extract::State;
use axum::Json;
use hemolink_db::models::stats::{AdminStats, BloodStockEntry, SystemStatistics};
use hemolink_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /admin-stats
///
/// Counters for the admin dashboard.
pub async fn admin_stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<AdminStats>> {
    let stats = StatsRepo::admin_stats(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /system-statistics
///
/// Public landing-page statistics: counters, donor blood-group
/// distribution, and the leaderboard.
pub async fn system_statistics(
    State(state): State<AppState>,
) -> AppResult<Json<SystemStatistics>> {
    let stats = StatsRepo::system_statistics(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /blood-stock
///
/// Active donors per blood group for the inventory gauges.
pub async fn blood_stock(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> AppResult<Json<Vec<BloodStockEntry>>> {
    let stock = StatsRepo::blood_stock(&state.pool).await?;
    Ok(Json(stock))
}
