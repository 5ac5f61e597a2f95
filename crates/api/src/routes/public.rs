use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public`. No auth.
///
/// ```text
/// GET /users/{username}   -> profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/users/{username}", get(public::profile))
}
