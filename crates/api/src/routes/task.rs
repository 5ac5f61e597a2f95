use axum::routing::get;
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /{id}/progress    -> list_progress
/// POST   /{id}/progress    -> log_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}/progress",
        get(progress::list_progress).post(progress::log_progress),
    )
}
