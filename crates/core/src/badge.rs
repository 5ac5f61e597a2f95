//! Badge rules evaluated after each progress log.
//!
//! Evaluation is pure: it inspects a challenge snapshot at a point in time and
//! reports which badges the owner is eligible for and whether the challenge
//! should transition to completed. Awarding is idempotent at the storage
//! layer, so the same evaluation can be replayed any number of times.

use serde::Serialize;

use crate::challenge::{days_since_start, ChallengeSnapshot};
use crate::types::{DbId, Timestamp};

/* --------------------------------------------------------------------------
Badge names
-------------------------------------------------------------------------- */

pub const BADGE_SEVEN_DAY_STREAK: &str = "7-Day Streak";
pub const BADGE_TWENTY_ONE_DAY_STREAK: &str = "21-Day Streak";
pub const BADGE_THIRTY_DAY_MILESTONE: &str = "30-Day Milestone";
pub const BADGE_CHALLENGE_COMPLETED: &str = "Challenge Completed";

/* --------------------------------------------------------------------------
Rules
-------------------------------------------------------------------------- */

/// Award `name` once at least `threshold_days` whole days have passed since
/// the challenge started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeRule {
    pub threshold_days: i64,
    pub name: &'static str,
}

/// Elapsed-time badges, checked in ascending threshold order.
pub const ELAPSED_DAY_RULES: &[BadgeRule] = &[
    BadgeRule {
        threshold_days: 7,
        name: BADGE_SEVEN_DAY_STREAK,
    },
    BadgeRule {
        threshold_days: 21,
        name: BADGE_TWENTY_ONE_DAY_STREAK,
    },
    BadgeRule {
        threshold_days: 30,
        name: BADGE_THIRTY_DAY_MILESTONE,
    },
];

/// A badge the user is eligible for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeAward {
    pub name: String,
    pub description: String,
    pub challenge_id: Option<DbId>,
}

/// Outcome of evaluating one challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeEvaluation {
    pub awards: Vec<BadgeAward>,
    /// The challenge reached its final day and is not yet marked completed.
    pub mark_completed: bool,
}

pub fn milestone_description(rule: &BadgeRule, challenge_name: &str) -> String {
    format!(
        "Kept going for {} days in \"{challenge_name}\"",
        rule.threshold_days
    )
}

pub fn completion_description(challenge_name: &str) -> String {
    format!("Completed the \"{challenge_name}\" challenge")
}

/// Evaluate every badge rule for `challenge` as of `now`.
pub fn evaluate_badges(challenge: &ChallengeSnapshot, now: Timestamp) -> BadgeEvaluation {
    let days_diff = days_since_start(challenge.start_date, now);

    let mut awards: Vec<BadgeAward> = ELAPSED_DAY_RULES
        .iter()
        .filter(|rule| days_diff >= rule.threshold_days)
        .map(|rule| BadgeAward {
            name: rule.name.to_string(),
            description: milestone_description(rule, &challenge.name),
            challenge_id: Some(challenge.id),
        })
        .collect();

    let final_day_reached = i64::from(challenge.duration_days) <= days_diff + 1;
    if final_day_reached {
        awards.push(BadgeAward {
            name: BADGE_CHALLENGE_COMPLETED.to_string(),
            description: completion_description(&challenge.name),
            challenge_id: Some(challenge.id),
        });
    }

    BadgeEvaluation {
        awards,
        mark_completed: final_day_reached && !challenge.is_completed,
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
