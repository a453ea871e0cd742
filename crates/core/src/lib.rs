//! Domain logic for the blood-donation request coordination service.
//!
//! This crate has no internal dependencies and holds everything the
//! repository and API layers share: the closed status/role/blood-group
//! enums, the request state machine, authorization predicates, the error
//! taxonomy, and pagination helpers.

pub mod access;
pub mod blood;
pub mod error;
pub mod lifecycle;
pub mod pagination;
pub mod roles;
pub mod types;
