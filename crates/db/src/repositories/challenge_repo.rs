//! Repository for the `challenges` table.

use sqlx::PgPool;
use stride_core::types::DbId;

use crate::models::challenge::{Challenge, CreateChallenge};
use crate::models::task::{CreateTask, Task};
use crate::repositories::task_repo::TaskRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, name, category, duration_days, start_date, end_date, is_completed, created_at";

fn insert_query() -> String {
    format!(
        "INSERT INTO challenges (user_id, name, category, duration_days, start_date, end_date)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {COLUMNS}"
    )
}

/// Provides create/read operations and the completion transition for challenges.
pub struct ChallengeRepo;

impl ChallengeRepo {
    /// Insert a challenge row on its own.
    pub async fn create(pool: &PgPool, input: &CreateChallenge) -> Result<Challenge, sqlx::Error> {
        let query = insert_query();
        sqlx::query_as::<_, Challenge>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.duration_days)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Insert a challenge and all of its tasks in one transaction.
    ///
    /// Either the challenge and every task are persisted, or nothing is.
    pub async fn create_with_tasks(
        pool: &PgPool,
        input: &CreateChallenge,
        tasks: &[CreateTask],
    ) -> Result<(Challenge, Vec<Task>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = insert_query();
        let challenge = sqlx::query_as::<_, Challenge>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.duration_days)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(&mut *tx)
            .await?;

        let mut created = Vec::with_capacity(tasks.len());
        for task in tasks {
            created.push(TaskRepo::create_in_tx(&mut tx, challenge.id, task).await?);
        }

        tx.commit().await?;
        Ok((challenge, created))
    }

    /// Find a challenge by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Challenge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM challenges WHERE id = $1");
        sqlx::query_as::<_, Challenge>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's challenges, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Challenge>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM challenges WHERE user_id = $1 ORDER BY start_date DESC, id DESC"
        );
        sqlx::query_as::<_, Challenge>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a challenge completed.
    ///
    /// Idempotent: an already-completed challenge is returned unchanged, and
    /// nothing ever sets `is_completed` back to false. Returns `None` if no
    /// row with the given `id` exists.
    pub async fn mark_completed(pool: &PgPool, id: DbId) -> Result<Option<Challenge>, sqlx::Error> {
        let query = format!(
            "UPDATE challenges SET is_completed = TRUE
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Challenge>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
