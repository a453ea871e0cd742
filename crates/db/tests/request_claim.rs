//! Repository-level tests for the donation-request claim and its schema
//! guarantees.

use chrono::{NaiveDate, NaiveTime};
use hemolink_core::lifecycle::RequestStatus;
use hemolink_db::models::donation_request::{
    CreateDonationRequest, DonationRequest, UpdateDonationRequest,
};
use hemolink_db::models::user::RegisterUser;
use hemolink_db::repositories::{DonationRequestRepo, UserRepo};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, email: &str, name: &str) {
    let input = RegisterUser {
        email: email.to_string(),
        name: name.to_string(),
        avatar_url: None,
        blood_group: "A+".parse().unwrap(),
        district: "Dhaka".to_string(),
        upazila: "Dhanmondi".to_string(),
    };
    UserRepo::register(pool, &input).await.unwrap();
}

async fn seed_request(pool: &PgPool, requester_email: &str) -> DonationRequest {
    let input = CreateDonationRequest {
        recipient_name: "Rahim Uddin".to_string(),
        blood_group: "A+".parse().unwrap(),
        recipient_district: "Dhaka".to_string(),
        recipient_upazila: "Dhanmondi".to_string(),
        hospital_name: "Dhaka Medical College Hospital".to_string(),
        full_address: "Secretariat Rd, Dhaka 1000".to_string(),
        donation_date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
        donation_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        request_message: String::new(),
    };
    DonationRequestRepo::create(pool, "Alice", requester_email, &input)
        .await
        .unwrap()
}

/// The conditional update claims a pending request exactly once; the second
/// attempt reports zero rows.
#[sqlx::test(migrations = "./migrations")]
async fn claim_is_first_writer_wins(pool: PgPool) {
    seed_user(&pool, "alice@test.com", "Alice").await;
    seed_user(&pool, "bob@test.com", "Bob").await;
    seed_user(&pool, "carol@test.com", "Carol").await;
    let request = seed_request(&pool, "alice@test.com").await;

    let first = DonationRequestRepo::claim(&pool, request.id, "Bob", "bob@test.com")
        .await
        .unwrap();
    let second = DonationRequestRepo::claim(&pool, request.id, "Carol", "carol@test.com")
        .await
        .unwrap();

    assert_eq!(first, 1);
    assert_eq!(second, 0);

    let row = DonationRequestRepo::find_by_id(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, RequestStatus::Inprogress);
    assert_eq!(row.donor_email.as_deref(), Some("bob@test.com"));
    assert_eq!(row.donor_name.as_deref(), Some("Bob"));
}

/// Concurrent claims through separate connections: exactly one lands.
#[sqlx::test(migrations = "./migrations")]
async fn concurrent_claims_are_exclusive(pool: PgPool) {
    seed_user(&pool, "alice@test.com", "Alice").await;
    seed_user(&pool, "bob@test.com", "Bob").await;
    seed_user(&pool, "carol@test.com", "Carol").await;
    let request = seed_request(&pool, "alice@test.com").await;

    let (bob, carol) = tokio::join!(
        DonationRequestRepo::claim(&pool, request.id, "Bob", "bob@test.com"),
        DonationRequestRepo::claim(&pool, request.id, "Carol", "carol@test.com"),
    );

    assert_eq!(bob.unwrap() + carol.unwrap(), 1);
}

/// The schema itself refuses a self-donation even if application guards
/// were bypassed.
#[sqlx::test(migrations = "./migrations")]
async fn schema_rejects_self_donation(pool: PgPool) {
    seed_user(&pool, "alice@test.com", "Alice").await;
    let request = seed_request(&pool, "alice@test.com").await;

    let result =
        DonationRequestRepo::claim(&pool, request.id, "Alice", "alice@test.com").await;
    assert!(result.is_err(), "ck_no_self_donation must refuse the row");
}

/// The terminal flip only applies to `inprogress` rows.
#[sqlx::test(migrations = "./migrations")]
async fn terminal_flip_requires_inprogress(pool: PgPool) {
    seed_user(&pool, "alice@test.com", "Alice").await;
    seed_user(&pool, "bob@test.com", "Bob").await;
    let request = seed_request(&pool, "alice@test.com").await;

    // Still pending: no rows.
    let rows = DonationRequestRepo::set_terminal_status(&pool, request.id, RequestStatus::Done)
        .await
        .unwrap();
    assert_eq!(rows, 0);

    DonationRequestRepo::claim(&pool, request.id, "Bob", "bob@test.com")
        .await
        .unwrap();
    let rows = DonationRequestRepo::set_terminal_status(&pool, request.id, RequestStatus::Done)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    // Terminal states never flip again.
    let rows =
        DonationRequestRepo::set_terminal_status(&pool, request.id, RequestStatus::Canceled)
            .await
            .unwrap();
    assert_eq!(rows, 0);
}

/// A field merge against a deleted row reports zero rows, so callers can
/// tell a vanished request apart from a successful edit.
#[sqlx::test(migrations = "./migrations")]
async fn field_merge_reports_deleted_row(pool: PgPool) {
    seed_user(&pool, "alice@test.com", "Alice").await;
    let request = seed_request(&pool, "alice@test.com").await;

    let input = UpdateDonationRequest {
        recipient_name: None,
        blood_group: None,
        recipient_district: None,
        recipient_upazila: None,
        hospital_name: Some("Square Hospital".to_string()),
        full_address: None,
        donation_date: None,
        donation_time: None,
        request_message: None,
    };

    let rows = DonationRequestRepo::update_fields(&pool, request.id, &input)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    DonationRequestRepo::delete(&pool, request.id).await.unwrap();

    let rows = DonationRequestRepo::update_fields(&pool, request.id, &input)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

/// Requests reference registered users; an unknown requester email is
/// refused by the foreign key.
#[sqlx::test(migrations = "./migrations")]
async fn requests_require_registered_requester(pool: PgPool) {
    let input = CreateDonationRequest {
        recipient_name: "Rahim Uddin".to_string(),
        blood_group: "A+".parse().unwrap(),
        recipient_district: "Dhaka".to_string(),
        recipient_upazila: "Dhanmondi".to_string(),
        hospital_name: "Dhaka Medical College Hospital".to_string(),
        full_address: "Secretariat Rd, Dhaka 1000".to_string(),
        donation_date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
        donation_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        request_message: String::new(),
    };
    let result = DonationRequestRepo::create(&pool, "Ghost", "ghost@test.com", &input).await;
    assert!(result.is_err());
}
