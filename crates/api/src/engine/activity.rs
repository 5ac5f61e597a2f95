use sqlx::PgPool;
use stride_core::activity::{reconstruct_activity, ActivityItem, EarnedBadge};
use stride_core::types::DbId;
use stride_db::repositories::BadgeRepo;

use crate::engine::history::load_user_history;
use crate::error::AppResult;

/// The user's merged activity feed, newest first.
pub async fn get_user_activity(pool: &PgPool, user_id: DbId) -> AppResult<Vec<ActivityItem>> {
    let history = load_user_history(pool, user_id).await?;
    let badges: Vec<EarnedBadge> = BadgeRepo::list_by_user(pool, user_id)
        .await?
        .iter()
        .map(|b| b.to_earned())
        .collect();

    Ok(reconstruct_activity(&history, &badges))
}
