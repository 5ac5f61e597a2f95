//! Repository for the `tasks` table.
//!
//! Tasks have no update or delete operations: once a challenge is created
//! its task list is fixed.

use sqlx::{PgPool, Postgres, Transaction};
use stride_core::types::DbId;

use crate::models::task::{CreateTask, OwnedTask, Task};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, challenge_id, name, scheduled_time, created_at";

fn insert_query() -> String {
    format!(
        "INSERT INTO tasks (challenge_id, name, scheduled_time)
         VALUES ($1, $2, $3)
         RETURNING {COLUMNS}"
    )
}

/// Provides create/read operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task for an existing challenge.
    pub async fn create(
        pool: &PgPool,
        challenge_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = insert_query();
        sqlx::query_as::<_, Task>(&query)
            .bind(challenge_id)
            .bind(&input.name)
            .bind(&input.scheduled_time)
            .fetch_one(pool)
            .await
    }

    /// Insert a task inside an open transaction.
    pub(crate) async fn create_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        challenge_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = insert_query();
        sqlx::query_as::<_, Task>(&query)
            .bind(challenge_id)
            .bind(&input.name)
            .bind(&input.scheduled_time)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a task together with the user that owns its challenge.
    pub async fn find_owned(pool: &PgPool, id: DbId) -> Result<Option<OwnedTask>, sqlx::Error> {
        sqlx::query_as::<_, OwnedTask>(
            "SELECT t.id, t.challenge_id, t.name, c.user_id AS owner_id
             FROM tasks t
             JOIN challenges c ON c.id = t.challenge_id
             WHERE t.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List the tasks of a challenge in creation order.
    pub async fn list_by_challenge(
        pool: &PgPool,
        challenge_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE challenge_id = $1 ORDER BY id");
        sqlx::query_as::<_, Task>(&query)
            .bind(challenge_id)
            .fetch_all(pool)
            .await
    }

    /// List every task across a user's challenges, grouped by challenge.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "SELECT t.id, t.challenge_id, t.name, t.scheduled_time, t.created_at
             FROM tasks t
             JOIN challenges c ON c.id = t.challenge_id
             WHERE c.user_id = $1
             ORDER BY t.challenge_id, t.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
