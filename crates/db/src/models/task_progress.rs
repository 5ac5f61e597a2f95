//! Task progress entry model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stride_core::error::CoreError;
use stride_core::history::ProgressEntry;
use stride_core::progress::ProgressStatus;
use stride_core::types::{DbId, Timestamp};

/// A row from the append-only `task_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskProgress {
    pub id: DbId,
    pub task_id: DbId,
    pub progress_date: Timestamp,
    pub status: String,
    /// Time spent in whole minutes.
    pub minutes_spent: Option<i32>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

impl TaskProgress {
    pub fn parsed_status(&self) -> Result<ProgressStatus, CoreError> {
        ProgressStatus::from_str_value(&self.status)
    }

    /// Convert to the core history representation.
    pub fn to_entry(&self) -> Result<ProgressEntry, CoreError> {
        Ok(ProgressEntry {
            id: self.id,
            date: self.progress_date,
            status: self.parsed_status()?,
            minutes_spent: self.minutes_spent,
        })
    }
}

/// DTO for appending a progress entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskProgress {
    pub task_id: DbId,
    pub progress_date: Timestamp,
    pub status: ProgressStatus,
    pub minutes_spent: Option<i32>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}
