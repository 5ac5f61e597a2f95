//! Repository for the append-only `task_progress` table.

use sqlx::PgPool;
use stride_core::types::{DbId, Timestamp};

use crate::models::task_progress::{CreateTaskProgress, TaskProgress};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, task_id, progress_date, status, minutes_spent, notes, image_url, created_at";

/// Same columns qualified with the `tp` alias for joined queries.
const QUALIFIED_COLUMNS: &str = "tp.id, tp.task_id, tp.progress_date, tp.status, \
                                 tp.minutes_spent, tp.notes, tp.image_url, tp.created_at";

/// Provides append and read operations for progress entries.
///
/// There is no update or delete: entries are immutable once logged.
pub struct TaskProgressRepo;

impl TaskProgressRepo {
    /// Append a progress entry, returning the created row.
    pub async fn log(pool: &PgPool, input: &CreateTaskProgress) -> Result<TaskProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO task_progress (task_id, progress_date, status, minutes_spent, notes, image_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskProgress>(&query)
            .bind(input.task_id)
            .bind(input.progress_date)
            .bind(input.status.as_str())
            .bind(input.minutes_spent)
            .bind(&input.notes)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a progress entry by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TaskProgress>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_progress WHERE id = $1");
        sqlx::query_as::<_, TaskProgress>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a task's entries ordered by date ascending.
    pub async fn list_by_task(pool: &PgPool, task_id: DbId) -> Result<Vec<TaskProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_progress
             WHERE task_id = $1
             ORDER BY progress_date ASC, id ASC"
        );
        sqlx::query_as::<_, TaskProgress>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// List every entry across all of a user's challenges, ordered by task
    /// and then date ascending.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<TaskProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS}
             FROM task_progress tp
             JOIN tasks t ON t.id = tp.task_id
             JOIN challenges c ON c.id = t.challenge_id
             WHERE c.user_id = $1
             ORDER BY tp.task_id, tp.progress_date ASC, tp.id ASC"
        );
        sqlx::query_as::<_, TaskProgress>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Dates of a user's completed entries, newest first.
    pub async fn list_completed_dates_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Timestamp>, sqlx::Error> {
        sqlx::query_scalar::<_, Timestamp>(
            "SELECT tp.progress_date
             FROM task_progress tp
             JOIN tasks t ON t.id = tp.task_id
             JOIN challenges c ON c.id = t.challenge_id
             WHERE c.user_id = $1 AND tp.status = 'completed'
             ORDER BY tp.progress_date DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
