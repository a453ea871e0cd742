//! Authentication primitives.
//!
//! Identity issuance lives with the external identity provider; this module
//! only validates the HS256 bearer tokens it issues. Token minting is kept
//! for the test harness.

pub mod jwt;
