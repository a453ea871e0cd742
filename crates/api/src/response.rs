//! Shared response envelope types for API handlers.
//!
//! The dashboard clients consume Mongo-style write acknowledgements
//! (`insertedId`, `modifiedCount`, `deletedCount`) and a `{result, count}`
//! envelope for paginated listings. Use these structs instead of ad-hoc
//! `serde_json::json!` so the shapes stay consistent across handlers.

use hemolink_core::types::DbId;
use serde::Serialize;

/// `{ "result": [...], "count": N }` envelope for paginated listings.
///
/// `count` is the total number of rows matching the filter, not the page
/// length, so clients can derive the page count.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub result: Vec<T>,
    pub count: i64,
}

/// Acknowledgement for creations: `{ "insertedId": N }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inserted {
    pub inserted_id: DbId,
}

/// Acknowledgement for updates: `{ "modifiedCount": N }`.
///
/// On the claim endpoint, `modifiedCount: 0` is the documented way of
/// reporting a lost race.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Modified {
    pub modified_count: u64,
}

/// Acknowledgement for deletions: `{ "deletedCount": N }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    pub deleted_count: u64,
}
