pub mod donation_request;
pub mod funding;
pub mod stats;
pub mod user;
