//! Route definitions for the `/challenges` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::challenge;
use crate::state::AppState;

/// Routes mounted at `/challenges`. All require auth and are owner-scoped.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// POST   /{id}/complete    -> complete
/// GET    /{id}/badges      -> list_badges
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(challenge::list).post(challenge::create))
        .route("/{id}", get(challenge::get_by_id))
        .route("/{id}/complete", post(challenge::complete))
        .route("/{id}/badges", get(challenge::list_badges))
}
