use sqlx::PgPool;
use stride_core::streak::StreakSummary;
use stride_core::types::{calendar_date, CalendarDate, DbId};
use stride_db::repositories::TaskProgressRepo;

use crate::error::AppResult;

/// Current and longest completion streaks for a user as of `today`.
pub async fn compute_streaks(
    pool: &PgPool,
    user_id: DbId,
    today: CalendarDate,
) -> AppResult<StreakSummary> {
    let dates = TaskProgressRepo::list_completed_dates_by_user(pool, user_id).await?;
    Ok(stride_core::streak::compute_streaks(
        dates.into_iter().map(calendar_date),
        today,
    ))
}
