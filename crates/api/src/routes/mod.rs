pub mod auth;
pub mod challenge;
pub mod health;
pub mod public;
pub mod task;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/me                           current user
///
/// /challenges                        list, create
/// /challenges/{id}                   detail with tasks
/// /challenges/{id}/complete          mark completed (POST)
/// /challenges/{id}/badges            challenge badges
///
/// /tasks/{id}/progress               list, log (POST)
///
/// /users/me/stats                    dashboard counters
/// /users/me/streaks                  current and longest streak
/// /users/me/activity                 merged activity feed
/// /users/me/badges                   every badge earned
///
/// /public/users/{username}           public profile (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/challenges", challenge::router())
        .nest("/tasks", task::router())
        .nest("/users/me", user::router())
        .nest("/public", public::router())
}
