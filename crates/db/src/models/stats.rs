//! Derived statistics payloads.
//!
//! All of these are read-only snapshots computed by `StatsRepo`; the field
//! names match what the dashboard and public landing pages consume.

use hemolink_core::types::DbId;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Admin dashboard counters (`GET /admin-stats`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: i64,
    pub total_requests: i64,
    pub successful_donations: i64,
    pub pending_requests: i64,
    pub total_revenue: Decimal,
}

/// One slice of the donor blood-group distribution pie.
#[derive(Debug, Clone, Serialize)]
pub struct BloodDistEntry {
    pub name: String,
    pub value: i64,
}

/// Leaderboard row: completed-donation count descending, ties broken by
/// earliest registration.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDonor {
    pub id: DbId,
    pub name: String,
    pub blood_group: String,
    pub district: String,
    pub donation_count: i64,
}

/// Public landing-page statistics (`GET /system-statistics`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatistics {
    pub total_users: i64,
    /// Requests still waiting for a donor.
    pub active_missions: i64,
    /// Completed donations.
    pub total_missions: i64,
    pub blood_dist: Vec<BloodDistEntry>,
    pub top_donors: Vec<TopDonor>,
}

/// One blood-stock gauge (`GET /blood-stock`): active donors per group.
#[derive(Debug, Clone, Serialize)]
pub struct BloodStockEntry {
    pub group: String,
    pub units: i64,
}
