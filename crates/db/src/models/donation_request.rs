//! Donation-request entity model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use hemolink_core::blood::BloodGroup;
use hemolink_core::lifecycle::RequestStatus;
use hemolink_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full donation-request row.
///
/// `donor_name`/`donor_email` are NULL while `status = pending` and are set
/// atomically with the `pending -> inprogress` flip by the claim update.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    pub id: DbId,
    pub requester_name: String,
    pub requester_email: String,
    pub recipient_name: String,
    pub blood_group: BloodGroup,
    pub recipient_district: String,
    pub recipient_upazila: String,
    pub hospital_name: String,
    pub full_address: String,
    pub donation_date: NaiveDate,
    pub donation_time: NaiveTime,
    pub request_message: String,
    pub status: RequestStatus,
    pub donor_name: Option<String>,
    pub donor_email: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a request. Requester identity comes from the
/// authenticated caller, never from the payload; status is always `pending`.
#[derive(Debug, Deserialize, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    #[validate(length(min = 1, message = "recipientName is required"))]
    pub recipient_name: String,
    pub blood_group: BloodGroup,
    #[validate(length(min = 1, message = "recipientDistrict is required"))]
    pub recipient_district: String,
    #[validate(length(min = 1, message = "recipientUpazila is required"))]
    pub recipient_upazila: String,
    #[validate(length(min = 1, message = "hospitalName is required"))]
    pub hospital_name: String,
    #[validate(length(min = 1, message = "fullAddress is required"))]
    pub full_address: String,
    pub donation_date: NaiveDate,
    pub donation_time: NaiveTime,
    #[serde(default)]
    pub request_message: String,
}

/// DTO for descriptive-field edits by the requester. Status and donor
/// columns are not reachable from here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDonationRequest {
    pub recipient_name: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub recipient_district: Option<String>,
    pub recipient_upazila: Option<String>,
    pub hospital_name: Option<String>,
    pub full_address: Option<String>,
    pub donation_date: Option<NaiveDate>,
    pub donation_time: Option<NaiveTime>,
    pub request_message: Option<String>,
}
