//! Read-only derived statistics over users, requests, and fundings.
//!
//! Every method is a snapshot query: no locking, no writes, tolerant of
//! concurrent mutations (eventually-consistent counts are acceptable for
//! every consumer of these numbers).

use hemolink_core::blood::ALL_BLOOD_GROUPS;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::stats::{
    AdminStats, BloodDistEntry, BloodStockEntry, SystemStatistics, TopDonor,
};

/// How many leaderboard rows the public statistics page shows.
const TOP_DONOR_LIMIT: i64 = 10;

/// Computes aggregate views. Never mutates the store.
pub struct StatsRepo;

impl StatsRepo {
    /// Counters for the admin dashboard.
    pub async fn admin_stats(pool: &PgPool) -> Result<AdminStats, sqlx::Error> {
        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        let total_requests: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM donation_requests")
            .fetch_one(pool)
            .await?;
        let successful_donations: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM donation_requests WHERE status = 'done'",
        )
        .fetch_one(pool)
        .await?;
        let pending_requests: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM donation_requests WHERE status = 'pending'",
        )
        .fetch_one(pool)
        .await?;
        let total_revenue: Decimal =
            sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0) FROM fundings")
                .fetch_one(pool)
                .await?;

        Ok(AdminStats {
            total_users,
            total_requests,
            successful_donations,
            pending_requests,
            total_revenue,
        })
    }

    /// Public landing-page statistics: counters, donor blood-group
    /// distribution, and the completed-donation leaderboard.
    pub async fn system_statistics(pool: &PgPool) -> Result<SystemStatistics, sqlx::Error> {
        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        let active_missions: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM donation_requests WHERE status = 'pending'",
        )
        .fetch_one(pool)
        .await?;
        let total_missions: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM donation_requests WHERE status = 'done'",
        )
        .fetch_one(pool)
        .await?;

        let blood_dist = Self::donor_distribution(pool).await?;

        // Completed donations per donor, ties broken by earliest
        // registration so the leaderboard order is deterministic.
        let top_donors = sqlx::query_as::<_, TopDonor>(
            "SELECT u.id, u.name, u.blood_group::text AS blood_group, u.district,
                    COUNT(r.id) AS donation_count
             FROM users u
             JOIN donation_requests r ON r.donor_email = u.email AND r.status = 'done'
             GROUP BY u.id, u.name, u.blood_group, u.district, u.created_at
             ORDER BY donation_count DESC, u.created_at ASC
             LIMIT $1",
        )
        .bind(TOP_DONOR_LIMIT)
        .fetch_all(pool)
        .await?;

        Ok(SystemStatistics {
            total_users,
            active_missions,
            total_missions,
            blood_dist,
            top_donors,
        })
    }

    /// Active donors per blood group for the stock gauges. Every group is
    /// present in the output, zero-count groups included.
    pub async fn blood_stock(pool: &PgPool) -> Result<Vec<BloodStockEntry>, sqlx::Error> {
        let counts: Vec<(String, i64)> = sqlx::query_as(
            "SELECT blood_group::text, COUNT(*)
             FROM users
             WHERE role = 'donor' AND status = 'active'
             GROUP BY blood_group",
        )
        .fetch_all(pool)
        .await?;

        Ok(ALL_BLOOD_GROUPS
            .into_iter()
            .map(|group| {
                let units = counts
                    .iter()
                    .find(|(name, _)| name == group.as_str())
                    .map_or(0, |(_, n)| *n);
                BloodStockEntry {
                    group: group.as_str().to_string(),
                    units,
                }
            })
            .collect())
    }

    /// Donor counts per blood group, zero-count groups included.
    async fn donor_distribution(pool: &PgPool) -> Result<Vec<BloodDistEntry>, sqlx::Error> {
        let counts: Vec<(String, i64)> = sqlx::query_as(
            "SELECT blood_group::text, COUNT(*)
             FROM users
             WHERE role = 'donor'
             GROUP BY blood_group",
        )
        .fetch_all(pool)
        .await?;

        Ok(ALL_BLOOD_GROUPS
            .into_iter()
            .map(|group| {
                let value = counts
                    .iter()
                    .find(|(name, _)| name == group.as_str())
                    .map_or(0, |(_, n)| *n);
                BloodDistEntry {
                    name: group.as_str().to_string(),
                    value,
                }
            })
            .collect())
    }
}
