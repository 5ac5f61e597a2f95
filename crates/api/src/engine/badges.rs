//! Badge awarding, the default post-write stage.

use async_trait::async_trait;
use sqlx::PgPool;
use stride_core::badge::evaluate_badges;
use stride_core::types::{DbId, Timestamp};
use stride_db::models::badge::{Badge, CreateBadge};
use stride_db::repositories::{BadgeRepo, ChallengeRepo};

use crate::engine::hooks::{ProgressHook, ProgressLogged};
use crate::error::AppResult;

/// Evaluates the badge rules for the challenge a progress entry belongs to.
pub struct BadgeEngine;

#[async_trait]
impl ProgressHook for BadgeEngine {
    fn name(&self) -> &'static str {
        "badge_engine"
    }

    async fn on_progress_logged(&self, pool: &PgPool, event: &ProgressLogged) -> AppResult<()> {
        check_and_award_badges(pool, event.user_id, event.challenge_id, event.logged_at).await?;
        Ok(())
    }
}

/// Award every badge `user_id` has earned on `challenge_id` as of `now`.
///
/// Marks the challenge completed once its final day is reached. Safe to call
/// repeatedly: awards are insert-if-absent and completion is idempotent.
/// Returns the badge rows matching the current evaluation, whether they
/// were inserted now or earlier.
///
/// A challenge that is missing or owned by someone else yields no badges.
pub async fn check_and_award_badges(
    pool: &PgPool,
    user_id: DbId,
    challenge_id: DbId,
    now: Timestamp,
) -> AppResult<Vec<Badge>> {
    let Some(challenge) = ChallengeRepo::find_by_id(pool, challenge_id).await? else {
        tracing::warn!(user_id, challenge_id, "Badge check skipped, challenge not found");
        return Ok(Vec::new());
    };

    if challenge.user_id != user_id {
        tracing::warn!(
            user_id,
            challenge_id,
            owner_id = challenge.user_id,
            "Badge check skipped, challenge owned by another user",
        );
        return Ok(Vec::new());
    }

    let evaluation = evaluate_badges(&challenge.snapshot(), now);

    if evaluation.mark_completed {
        ChallengeRepo::mark_completed(pool, challenge.id).await?;
        tracing::info!(user_id, challenge_id, "Challenge completed");
    }

    let mut badges = Vec::with_capacity(evaluation.awards.len());
    for award in &evaluation.awards {
        let (badge, inserted) =
            BadgeRepo::create_if_not_exists(pool, &CreateBadge::from_award(user_id, award))
                .await?;
        if inserted {
            tracing::info!(
                user_id,
                challenge_id,
                badge_id = badge.id,
                badge = %badge.name,
                "Badge awarded",
            );
        }
        badges.push(badge);
    }

    Ok(badges)
}
