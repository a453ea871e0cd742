//! Funding records: the payment collaborator's write-once output.

use hemolink_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A captured payment. Read-only after insertion.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Funding {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub amount: Decimal,
    pub transaction_id: String,
    pub created_at: Timestamp,
}

/// DTO recorded by the payment collaborator after a successful capture.
#[derive(Debug, Deserialize, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFunding {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub amount: Decimal,
    #[validate(length(min = 1, message = "transactionId is required"))]
    pub transaction_id: String,
}
