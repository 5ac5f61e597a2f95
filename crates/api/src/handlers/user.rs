//! Handlers for the caller's own aggregates under `/users/me`.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use stride_core::activity::ActivityItem;
use stride_core::stats::UserStats;
use stride_core::streak::StreakSummary;
use stride_core::types::calendar_date;
use stride_db::models::badge::Badge;
use stride_db::repositories::BadgeRepo;

use crate::engine;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users/me/stats
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserStats>>> {
    let data = engine::stats::get_user_stats(&state.pool, auth.user_id, Utc::now()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/users/me/streaks
pub async fn streaks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<StreakSummary>>> {
    let today = calendar_date(Utc::now());
    let data = engine::streaks::compute_streaks(&state.pool, auth.user_id, today).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/users/me/activity
pub async fn activity(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ActivityItem>>>> {
    let data = engine::activity::get_user_activity(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/users/me/badges
pub async fn badges(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Badge>>>> {
    let data = BadgeRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data }))
}
