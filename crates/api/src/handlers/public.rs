//! Read-only public profiles. No authentication.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use stride_core::stats::UserStats;
use stride_core::types::Timestamp;
use stride_db::models::badge::Badge;
use stride_db::repositories::{BadgeRepo, UserRepo};

use crate::engine;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// What anyone can see about a user. Email is never included.
#[derive(Debug, Serialize)]
pub struct PublicProfile {
    pub username: String,
    pub display_name: String,
    pub member_since: Timestamp,
    pub stats: UserStats,
    pub badges: Vec<Badge>,
}

/// GET /api/v1/public/users/{username}
pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<DataResponse<PublicProfile>>> {
    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    let stats = engine::stats::get_user_stats(&state.pool, user.id, Utc::now()).await?;
    let badges = BadgeRepo::list_by_user(&state.pool, user.id).await?;

    Ok(Json(DataResponse {
        data: PublicProfile {
            username: user.username,
            display_name: user.display_name,
            member_since: user.created_at,
            stats,
            badges,
        },
    }))
}
