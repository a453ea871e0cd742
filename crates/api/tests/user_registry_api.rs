//! HTTP-level integration tests for the user registry.
//!
//! Tests cover the first-registration upsert, profile reads and edits,
//! the protected-field rule, the admin role probe, and admin role/status
//! management with the self-action rule.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get_auth, patch_json_auth, post_json, seed_user, seed_user_with_role, token_for,
};
use hemolink_core::roles::Role;
use hemolink_db::repositories::UserRepo;
use sqlx::PgPool;

fn registration_body(email: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "name": name,
        "bloodGroup": "A+",
        "district": "Dhaka",
        "upazila": "Dhanmondi"
    })
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// First registration inserts a row with the `donor`/`active` defaults.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/users", registration_body("alice@test.com", "Alice")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["insertedId"].as_i64().expect("insertedId should be a number");

    let user = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(user.email, "alice@test.com");
    assert_eq!(user.role, Role::Donor);
}

/// Repeat registration returns the existing row untouched: a promoted
/// user's role survives a re-registration.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_repeat_registration_preserves_role(pool: PgPool) {
    let user =
        seed_user_with_role(&pool, "vol@test.com", "Vol", "O+", Role::Volunteer).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/users", registration_body("vol@test.com", "Vol")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["insertedId"], user.id);

    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.role, Role::Volunteer);
}

/// A malformed email fails validation.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_rejects_bad_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/users", registration_body("not-an-email", "Alice")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Profile reads and edits
// ---------------------------------------------------------------------------

/// Owners and admins can read a profile; other users cannot.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_user_rbac(pool: PgPool) {
    seed_user(&pool, "alice@test.com", "Alice", "A+").await;
    seed_user(&pool, "bob@test.com", "Bob", "O-").await;
    seed_user_with_role(&pool, "admin@test.com", "Admin", "O+", Role::Admin).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/users/alice@test.com", &token_for("alice@test.com", "Alice")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["bloodGroup"], "A+");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/users/alice@test.com", &token_for("bob@test.com", "Bob")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response =
        get_auth(app, "/users/alice@test.com", &token_for("admin@test.com", "Admin")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// An admin reading an unregistered email gets 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_unknown_user(pool: PgPool) {
    seed_user_with_role(&pool, "admin@test.com", "Admin", "O+", Role::Admin).await;

    let app = common::build_test_app(pool);
    let response =
        get_auth(app, "/users/ghost@test.com", &token_for("admin@test.com", "Admin")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The owner can merge profile fields; omitted fields stay untouched.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_owner_updates_profile(pool: PgPool) {
    seed_user(&pool, "alice@test.com", "Alice", "A+").await;

    let app = common::build_test_app(pool);
    let response = patch_json_auth(
        app,
        "/users/alice@test.com",
        serde_json::json!({ "district": "Chattogram", "upazila": "Pahartali" }),
        &token_for("alice@test.com", "Alice"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["district"], "Chattogram");
    assert_eq!(json["upazila"], "Pahartali");
    assert_eq!(json["name"], "Alice");
    assert_eq!(json["bloodGroup"], "A+");
}

/// A payload naming a protected field is refused outright, never silently
/// dropped.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_update_rejects_protected_fields(pool: PgPool) {
    seed_user(&pool, "alice@test.com", "Alice", "A+").await;

    for field in ["email", "role", "status"] {
        let app = common::build_test_app(pool.clone());
        let response = patch_json_auth(
            app,
            "/users/alice@test.com",
            serde_json::json!({ field: "whatever" }),
            &token_for("alice@test.com", "Alice"),
        )
        .await;
        assert_eq!(
            response.status(),
            StatusCode::FORBIDDEN,
            "{field} must be refused"
        );
    }
}

/// Only the owner may edit a profile, even with the admin role.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_update_is_owner_only(pool: PgPool) {
    seed_user(&pool, "alice@test.com", "Alice", "A+").await;
    seed_user_with_role(&pool, "admin@test.com", "Admin", "O+", Role::Admin).await;

    let app = common::build_test_app(pool);
    let response = patch_json_auth(
        app,
        "/users/alice@test.com",
        serde_json::json!({ "district": "Sylhet" }),
        &token_for("admin@test.com", "Admin"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Role probe
// ---------------------------------------------------------------------------

/// The role probe answers for the caller's own email only.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_probe(pool: PgPool) {
    seed_user(&pool, "alice@test.com", "Alice", "A+").await;
    seed_user_with_role(&pool, "admin@test.com", "Admin", "O+", Role::Admin).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get_auth(app, "/users/admin/admin@test.com", &token_for("admin@test.com", "Admin")).await,
    )
    .await;
    assert_eq!(json["admin"], true);

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get_auth(app, "/users/admin/alice@test.com", &token_for("alice@test.com", "Alice")).await,
    )
    .await;
    assert_eq!(json["admin"], false);

    // Probing someone else's email is refused.
    let app = common::build_test_app(pool);
    let response =
        get_auth(app, "/users/admin/admin@test.com", &token_for("alice@test.com", "Alice")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Admin user management
// ---------------------------------------------------------------------------

/// The registry listing is admin-only and honours the status filter.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_users(pool: PgPool) {
    seed_user(&pool, "alice@test.com", "Alice", "A+").await;
    common::seed_blocked_user(&pool, "blocked@test.com", "Blocked", "B+").await;
    seed_user_with_role(&pool, "admin@test.com", "Admin", "O+", Role::Admin).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/users", &token_for("alice@test.com", "Alice")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let json =
        body_json(get_auth(app, "/users", &token_for("admin@test.com", "Admin")).await).await;
    assert_eq!(json.as_array().unwrap().len(), 3);

    let app = common::build_test_app(pool);
    let json = body_json(
        get_auth(app, "/users?status=blocked", &token_for("admin@test.com", "Admin")).await,
    )
    .await;
    let users = json.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "blocked@test.com");
}

/// An admin can promote a donor; the new role is visible immediately.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_sets_role(pool: PgPool) {
    let alice = seed_user(&pool, "alice@test.com", "Alice", "A+").await;
    seed_user_with_role(&pool, "admin@test.com", "Admin", "O+", Role::Admin).await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/users/role/{}", alice.id),
        serde_json::json!({ "role": "volunteer" }),
        &token_for("admin@test.com", "Admin"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["modifiedCount"], 1);

    let reloaded = UserRepo::find_by_id(&pool, alice.id).await.unwrap().unwrap();
    assert_eq!(reloaded.role, Role::Volunteer);
}

/// Non-admins cannot change roles.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_role_change_requires_admin(pool: PgPool) {
    let alice = seed_user(&pool, "alice@test.com", "Alice", "A+").await;
    seed_user_with_role(&pool, "vol@test.com", "Vol", "O+", Role::Volunteer).await;

    let app = common::build_test_app(pool);
    let response = patch_json_auth(
        app,
        &format!("/users/role/{}", alice.id),
        serde_json::json!({ "role": "admin" }),
        &token_for("vol@test.com", "Vol"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// An admin can never change their own role or status.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_self_action_denied(pool: PgPool) {
    let admin = seed_user_with_role(&pool, "admin@test.com", "Admin", "O+", Role::Admin).await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/users/role/{}", admin.id),
        serde_json::json!({ "role": "donor" }),
        &token_for("admin@test.com", "Admin"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "SELF_ACTION_DENIED");

    let app = common::build_test_app(pool);
    let response = patch_json_auth(
        app,
        &format!("/users/status/{}", admin.id),
        serde_json::json!({ "status": "blocked" }),
        &token_for("admin@test.com", "Admin"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A role payload outside the closed enum is rejected before it reaches
/// the database.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_role_is_rejected(pool: PgPool) {
    let alice = seed_user(&pool, "alice@test.com", "Alice", "A+").await;
    seed_user_with_role(&pool, "admin@test.com", "Admin", "O+", Role::Admin).await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/users/role/{}", alice.id),
        serde_json::json!({ "role": "superuser" }),
        &token_for("admin@test.com", "Admin"),
    )
    .await;
    assert!(response.status().is_client_error());

    let reloaded = UserRepo::find_by_id(&pool, alice.id).await.unwrap().unwrap();
    assert_eq!(reloaded.role, Role::Donor);
}

/// Changing the role of an unknown id returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_role_change_unknown_target(pool: PgPool) {
    seed_user_with_role(&pool, "admin@test.com", "Admin", "O+", Role::Admin).await;

    let app = common::build_test_app(pool);
    let response = patch_json_auth(
        app,
        "/users/role/999999",
        serde_json::json!({ "role": "volunteer" }),
        &token_for("admin@test.com", "Admin"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// A block takes effect on the target's very next request, and an unblock
/// restores them.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_block_and_unblock_cycle(pool: PgPool) {
    let alice = seed_user(&pool, "alice@test.com", "Alice", "A+").await;
    seed_user_with_role(&pool, "admin@test.com", "Admin", "O+", Role::Admin).await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/users/status/{}", alice.id),
        serde_json::json!({ "status": "blocked" }),
        &token_for("admin@test.com", "Admin"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Blocked users cannot create requests, with no re-login required.
    let app = common::build_test_app(pool.clone());
    let response = common::post_json_auth(
        app,
        "/donation-requests",
        common::request_body(),
        &token_for("alice@test.com", "Alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    patch_json_auth(
        app,
        &format!("/users/status/{}", alice.id),
        serde_json::json!({ "status": "active" }),
        &token_for("admin@test.com", "Admin"),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = common::post_json_auth(
        app,
        "/donation-requests",
        common::request_body(),
        &token_for("alice@test.com", "Alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
