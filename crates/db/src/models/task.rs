//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stride_core::types::{DbId, Timestamp};

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub challenge_id: DbId,
    pub name: String,
    /// `HH:MM` label, informational only.
    pub scheduled_time: Option<String>,
    pub created_at: Timestamp,
}

/// A task joined with the user that owns its challenge.
#[derive(Debug, Clone, FromRow)]
pub struct OwnedTask {
    pub id: DbId,
    pub challenge_id: DbId,
    pub name: String,
    pub owner_id: DbId,
}

/// DTO for a task created alongside its challenge.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub name: String,
    pub scheduled_time: Option<String>,
}
