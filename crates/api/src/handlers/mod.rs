pub mod donation_requests;
pub mod donors;
pub mod fundings;
pub mod stats;
pub mod users;
