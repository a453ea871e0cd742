//! Shared test harness for HTTP-level integration tests.
//!
//! `build_test_app` mirrors the router construction in `main.rs` so tests
//! exercise the same middleware stack (CORS, request ID, timeout, tracing,
//! panic recovery) that production uses. Helpers mint tokens with a fixed
//! test secret and seed registry rows directly through the repositories.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use hemolink_api::auth::jwt::{generate_access_token, JwtConfig};
use hemolink_api::config::ServerConfig;
use hemolink_api::router::build_app_router;
use hemolink_api::state::AppState;
use hemolink_core::roles::{Role, UserStatus};
use hemolink_db::models::user::{RegisterUser, User};
use hemolink_db::repositories::UserRepo;

/// JWT configuration used by every test token.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry_mins: 60,
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint an access token for the given identity, signed with the test secret.
pub fn token_for(email: &str, name: &str) -> String {
    generate_access_token(email, name, &test_jwt_config())
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Register a user directly through the repository. Lands with the table
/// defaults: `role = donor`, `status = active`.
pub async fn seed_user(pool: &PgPool, email: &str, name: &str, blood_group: &str) -> User {
    let input = RegisterUser {
        email: email.to_string(),
        name: name.to_string(),
        avatar_url: None,
        blood_group: blood_group.parse().expect("valid blood group"),
        district: "Dhaka".to_string(),
        upazila: "Dhanmondi".to_string(),
    };
    UserRepo::register(pool, &input)
        .await
        .expect("user registration should succeed")
}

/// Register a user and promote them to the given role.
pub async fn seed_user_with_role(
    pool: &PgPool,
    email: &str,
    name: &str,
    blood_group: &str,
    role: Role,
) -> User {
    let user = seed_user(pool, email, name, blood_group).await;
    UserRepo::set_role(pool, user.id, role)
        .await
        .expect("role change should succeed");
    UserRepo::find_by_id(pool, user.id)
        .await
        .expect("lookup should succeed")
        .expect("user should exist")
}

/// Register a user and block them.
pub async fn seed_blocked_user(pool: &PgPool, email: &str, name: &str, blood_group: &str) -> User {
    let user = seed_user(pool, email, name, blood_group).await;
    UserRepo::set_status(pool, user.id, UserStatus::Blocked)
        .await
        .expect("status change should succeed");
    UserRepo::find_by_id(pool, user.id)
        .await
        .expect("lookup should succeed")
        .expect("user should exist")
}

/// A well-formed donation-request creation body.
pub fn request_body() -> serde_json::Value {
    serde_json::json!({
        "recipientName": "Rahim Uddin",
        "bloodGroup": "A+",
        "recipientDistrict": "Dhaka",
        "recipientUpazila": "Dhanmondi",
        "hospitalName": "Dhaka Medical College Hospital",
        "fullAddress": "Secretariat Rd, Dhaka 1000",
        "donationDate": "2026-09-15",
        "donationTime": "14:30:00",
        "requestMessage": "Urgent surgery tomorrow morning."
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send an unauthenticated GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Send an unauthenticated POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Send a PATCH request with a JSON body and a Bearer token.
pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Send a DELETE request with a Bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
