//! Loads the challenge -> task -> entry tree the stats and activity folds walk.

use std::collections::HashMap;

use sqlx::PgPool;
use stride_core::history::{ChallengeHistory, ProgressEntry, TaskHistory};
use stride_core::types::DbId;
use stride_db::repositories::{ChallengeRepo, TaskProgressRepo, TaskRepo};

use crate::error::AppResult;

/// Load every challenge a user owns with its tasks and their entries.
///
/// Three queries regardless of how many challenges the user has. Challenges
/// keep the repository order, tasks their creation order, entries their date
/// order.
pub async fn load_user_history(pool: &PgPool, user_id: DbId) -> AppResult<Vec<ChallengeHistory>> {
    let challenges = ChallengeRepo::list_by_user(pool, user_id).await?;
    let tasks = TaskRepo::list_by_user(pool, user_id).await?;
    let progress = TaskProgressRepo::list_by_user(pool, user_id).await?;

    let mut entries_by_task: HashMap<DbId, Vec<ProgressEntry>> = HashMap::new();
    for row in &progress {
        entries_by_task
            .entry(row.task_id)
            .or_default()
            .push(row.to_entry()?);
    }

    let mut tasks_by_challenge: HashMap<DbId, Vec<TaskHistory>> = HashMap::new();
    for task in tasks {
        let entries = entries_by_task.remove(&task.id).unwrap_or_default();
        tasks_by_challenge
            .entry(task.challenge_id)
            .or_default()
            .push(TaskHistory {
                id: task.id,
                name: task.name,
                entries,
            });
    }

    Ok(challenges
        .iter()
        .map(|c| ChallengeHistory {
            challenge: c.snapshot(),
            tasks: tasks_by_challenge.remove(&c.id).unwrap_or_default(),
        })
        .collect())
}
