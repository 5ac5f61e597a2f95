//! Challenge entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stride_core::challenge::ChallengeSnapshot;
use stride_core::types::{DbId, Timestamp};

/// A challenge row from the `challenges` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Challenge {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub category: String,
    pub duration_days: i32,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub is_completed: bool,
    pub created_at: Timestamp,
}

impl Challenge {
    /// The fields lifecycle and badge rules operate on.
    pub fn snapshot(&self) -> ChallengeSnapshot {
        ChallengeSnapshot {
            id: self.id,
            user_id: self.user_id,
            name: self.name.clone(),
            duration_days: self.duration_days,
            start_date: self.start_date,
            end_date: self.end_date,
            is_completed: self.is_completed,
        }
    }
}

/// DTO for inserting a challenge.
///
/// `start_date` and `end_date` are computed by the caller; the end date is
/// never recomputed after insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChallenge {
    pub user_id: DbId,
    pub name: String,
    pub category: String,
    pub duration_days: i32,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}
