mod donation_request_repo;
mod funding_repo;
mod stats_repo;
mod user_repo;

pub use donation_request_repo::DonationRequestRepo;
pub use funding_repo::FundingRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
