//! Badge entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stride_core::activity::EarnedBadge;
use stride_core::badge::BadgeAward;
use stride_core::types::{DbId, Timestamp};

/// A row from the `badges` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Badge {
    pub id: DbId,
    pub user_id: DbId,
    /// `None` for account-level badges.
    pub challenge_id: Option<DbId>,
    pub name: String,
    pub description: String,
    pub earned_at: Timestamp,
}

impl Badge {
    pub fn to_earned(&self) -> EarnedBadge {
        EarnedBadge {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            challenge_id: self.challenge_id,
            earned_at: self.earned_at,
        }
    }
}

/// DTO for inserting a badge.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBadge {
    pub user_id: DbId,
    pub challenge_id: Option<DbId>,
    pub name: String,
    pub description: String,
}

impl CreateBadge {
    /// Build the insert for an evaluated award owned by `user_id`.
    pub fn from_award(user_id: DbId, award: &BadgeAward) -> Self {
        Self {
            user_id,
            challenge_id: award.challenge_id,
            name: award.name.clone(),
            description: award.description.clone(),
        }
    }
}
