//! Repository for the `donation_requests` table.
//!
//! Every listing orders by `(created_at DESC, id DESC)`; the `id` tiebreak
//! keeps pagination stable under concurrent inserts. The claim operation is
//! the one write with stronger-than-last-writer-wins semantics: a single
//! conditional UPDATE guarantees at most one donor per request.

use hemolink_core::blood::BloodGroup;
use hemolink_core::lifecycle::RequestStatus;
use hemolink_core::types::DbId;
use sqlx::PgPool;

use crate::models::donation_request::{
    CreateDonationRequest, DonationRequest, UpdateDonationRequest,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, requester_name, requester_email, recipient_name, blood_group, \
                       recipient_district, recipient_upazila, hospital_name, full_address, \
                       donation_date, donation_time, request_message, status, \
                       donor_name, donor_email, created_at";

/// Provides persistence and indexed retrieval for donation requests.
pub struct DonationRequestRepo;

impl DonationRequestRepo {
    /// Insert a new `pending` request with NULL donor fields, returning the
    /// created row. Requester identity comes from the authenticated caller.
    pub async fn create(
        pool: &PgPool,
        requester_name: &str,
        requester_email: &str,
        input: &CreateDonationRequest,
    ) -> Result<DonationRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO donation_requests
                (requester_name, requester_email, recipient_name, blood_group,
                 recipient_district, recipient_upazila, hospital_name, full_address,
                 donation_date, donation_time, request_message)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(requester_name)
            .bind(requester_email)
            .bind(&input.recipient_name)
            .bind(input.blood_group)
            .bind(&input.recipient_district)
            .bind(&input.recipient_upazila)
            .bind(&input.hospital_name)
            .bind(&input.full_address)
            .bind(input.donation_date)
            .bind(input.donation_time)
            .bind(&input.request_message)
            .fetch_one(pool)
            .await
    }

    /// Find a request by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DonationRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donation_requests WHERE id = $1");
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All `pending` requests for the public board. `limit = None` returns
    /// the full list (the current board does not paginate).
    pub async fn list_pending(
        pool: &PgPool,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<DonationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donation_requests
             WHERE status = 'pending'
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// One page of a requester's own requests, optionally filtered by
    /// status (`None` = all).
    pub async fn list_by_requester(
        pool: &PgPool,
        email: &str,
        status: Option<RequestStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DonationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donation_requests
             WHERE requester_email = $1
               AND ($2::request_status IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(email)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows behind [`DonationRequestRepo::list_by_requester`], for the
    /// pagination envelope.
    pub async fn count_by_requester(
        pool: &PgPool,
        email: &str,
        status: Option<RequestStatus>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM donation_requests
             WHERE requester_email = $1
               AND ($2::request_status IS NULL OR status = $2)",
        )
        .bind(email)
        .bind(status)
        .fetch_one(pool)
        .await
    }

    /// A requester's most recent requests for the dashboard home widget.
    pub async fn recent_by_requester(
        pool: &PgPool,
        email: &str,
        limit: i64,
    ) -> Result<Vec<DonationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donation_requests
             WHERE requester_email = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(email)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// One page of active operations (`pending` or `inprogress`), with an
    /// optional blood-group filter.
    pub async fn list_active(
        pool: &PgPool,
        blood_group: Option<BloodGroup>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DonationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donation_requests
             WHERE status IN ('pending', 'inprogress')
               AND ($1::blood_group IS NULL OR blood_group = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(blood_group)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows behind [`DonationRequestRepo::list_active`].
    pub async fn count_active(
        pool: &PgPool,
        blood_group: Option<BloodGroup>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM donation_requests
             WHERE status IN ('pending', 'inprogress')
               AND ($1::blood_group IS NULL OR blood_group = $1)",
        )
        .bind(blood_group)
        .fetch_one(pool)
        .await
    }

    /// One page of the global staff view, optionally filtered by status.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<RequestStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DonationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donation_requests
             WHERE ($1::request_status IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows behind [`DonationRequestRepo::list_all`].
    pub async fn count_all(
        pool: &PgPool,
        status: Option<RequestStatus>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM donation_requests
             WHERE ($1::request_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(pool)
        .await
    }

    /// Merge descriptive fields only. Status and donor columns are not
    /// touched by this statement. Returns the number of rows updated.
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDonationRequest,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE donation_requests SET
                recipient_name = COALESCE($2, recipient_name),
                blood_group = COALESCE($3, blood_group),
                recipient_district = COALESCE($4, recipient_district),
                recipient_upazila = COALESCE($5, recipient_upazila),
                hospital_name = COALESCE($6, hospital_name),
                full_address = COALESCE($7, full_address),
                donation_date = COALESCE($8, donation_date),
                donation_time = COALESCE($9, donation_time),
                request_message = COALESCE($10, request_message)
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.recipient_name)
        .bind(input.blood_group)
        .bind(&input.recipient_district)
        .bind(&input.recipient_upazila)
        .bind(&input.hospital_name)
        .bind(&input.full_address)
        .bind(input.donation_date)
        .bind(input.donation_time)
        .bind(&input.request_message)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// The atomic claim: attach the donor and flip `pending -> inprogress`
    /// in one conditional statement.
    ///
    /// Returns the number of rows updated. Zero means the request was no
    /// longer `pending` at commit time — another donor won the race or the
    /// request was withdrawn — and the caller must report
    /// `AlreadyClaimed`. The exclusivity guarantee rests entirely on the
    /// `status = 'pending'` condition here, not on any pre-check.
    pub async fn claim(
        pool: &PgPool,
        id: DbId,
        donor_name: &str,
        donor_email: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE donation_requests
             SET status = 'inprogress', donor_name = $2, donor_email = $3
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .bind(donor_name)
        .bind(donor_email)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Flip an `inprogress` request to a terminal state. Conditional on the
    /// current status so a concurrent or repeated edit fails with zero rows
    /// instead of corrupting a terminal state.
    pub async fn set_terminal_status(
        pool: &PgPool,
        id: DbId,
        next: RequestStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE donation_requests
             SET status = $2
             WHERE id = $1 AND status = 'inprogress'",
        )
        .bind(id)
        .bind(next)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Remove a request in any status. Returns the number of rows deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM donation_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
