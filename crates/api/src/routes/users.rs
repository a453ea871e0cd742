//! Route definitions for the user registry.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User registry routes. The static `role` / `status` / `admin` segments
/// take precedence over the `{email}` parameter.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::register).get(users::list_users))
        .route(
            "/users/{email}",
            get(users::get_user).patch(users::update_profile),
        )
        .route("/users/admin/{email}", get(users::is_admin))
        .route("/users/role/{id}", patch(users::set_role))
        .route("/users/status/{id}", patch(users::set_status))
}
