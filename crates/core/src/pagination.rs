//! Pagination constants and helpers.
//!
//! Pages are 0-based to match the dashboard clients. Every paginated query
//! orders by `created_at DESC, id DESC`; the `id` tiebreak keeps the sort
//! stable so concurrent inserts cannot skip or duplicate rows across pages.

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of rows per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a caller-supplied page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_size(size: Option<i64>) -> i64 {
    size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Offset for a 0-based page index. Negative page numbers clamp to 0.
pub fn page_offset(page: Option<i64>, size: i64) -> i64 {
    page.unwrap_or(0).max(0) * size
}
