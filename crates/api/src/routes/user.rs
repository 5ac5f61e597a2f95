use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users/me`. All require auth.
///
/// ```text
/// GET /stats      -> stats
/// GET /streaks    -> streaks
/// GET /activity   -> activity
/// GET /badges     -> badges
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(user::stats))
        .route("/streaks", get(user::streaks))
        .route("/activity", get(user::activity))
        .route("/badges", get(user::badges))
}
