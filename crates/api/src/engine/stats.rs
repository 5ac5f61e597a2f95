use sqlx::PgPool;
use stride_core::history::completed_dates;
use stride_core::stats::{fold_user_stats, UserStats};
use stride_core::streak::compute_streaks;
use stride_core::types::{calendar_date, DbId, Timestamp};
use stride_db::repositories::BadgeRepo;

use crate::engine::history::load_user_history;
use crate::error::AppResult;

/// Dashboard counters for a user. Read-only.
///
/// Task counters and streaks are folded from the same loaded history, so a
/// concurrent progress log shows up in both or in neither.
pub async fn get_user_stats(pool: &PgPool, user_id: DbId, now: Timestamp) -> AppResult<UserStats> {
    let history = load_user_history(pool, user_id).await?;
    let badges = BadgeRepo::count_by_user(pool, user_id).await?;
    let streaks = compute_streaks(completed_dates(&history), calendar_date(now));

    Ok(fold_user_stats(
        &history,
        u32::try_from(badges).unwrap_or(u32::MAX),
        streaks,
    ))
}
