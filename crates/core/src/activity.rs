//! Activity feed reconstruction.
//!
//! Three independent sources (challenge rows, progress entries, badges) are
//! merged into one reverse-chronological feed. Item ids are synthetic and
//! only unique within a single reconstruction; they exist so clients have a
//! stable render key and carry no ordering meaning.

use std::collections::HashMap;

use serde::Serialize;

use crate::history::ChallengeHistory;
use crate::progress::{minutes_to_hours, ProgressStatus};
use crate::types::{DbId, Timestamp};

/// Label for badges that are not tied to a challenge.
pub const ACCOUNT_BADGE_LABEL: &str = "General";

/// Label for badges whose challenge could not be loaded.
pub const UNKNOWN_CHALLENGE_LABEL: &str = "System";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Created,
    Completed,
    Missed,
    Badge,
}

/// Source-specific payload of an activity item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActivityDetail {
    Challenge {
        challenge_id: DbId,
        challenge_name: String,
    },
    Task {
        challenge_id: DbId,
        challenge_name: String,
        task_id: DbId,
        task_name: String,
        progress_id: DbId,
        hours_spent: f64,
        status: ProgressStatus,
    },
    Badge {
        badge_id: DbId,
        badge_name: String,
        description: String,
        challenge_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityItem {
    pub id: u64,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub date: Timestamp,
    #[serde(flatten)]
    pub detail: ActivityDetail,
}

/// A badge row as the feed needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarnedBadge {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub challenge_id: Option<DbId>,
    pub earned_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Reconstruction
// ---------------------------------------------------------------------------

/// Map a progress status onto its feed item type.
pub fn progress_activity_type(status: ProgressStatus) -> ActivityType {
    match status {
        ProgressStatus::Completed => ActivityType::Completed,
        ProgressStatus::Partial | ProgressStatus::NoAction => ActivityType::Missed,
    }
}

struct FeedBuilder {
    next_id: u64,
    items: Vec<ActivityItem>,
}

impl FeedBuilder {
    fn push(&mut self, activity_type: ActivityType, date: Timestamp, detail: ActivityDetail) {
        self.next_id += 1;
        self.items.push(ActivityItem {
            id: self.next_id,
            activity_type,
            date,
            detail,
        });
    }
}

/// Build the merged feed, newest first.
///
/// Items are generated challenge by challenge (creation, challenge-level
/// completion, then each task's entries) followed by badges. The final sort
/// is stable, so items sharing a date keep that generation order.
pub fn reconstruct_activity(
    history: &[ChallengeHistory],
    badges: &[EarnedBadge],
) -> Vec<ActivityItem> {
    let mut feed = FeedBuilder {
        next_id: 0,
        items: Vec::new(),
    };

    for item in history {
        let challenge = &item.challenge;

        feed.push(
            ActivityType::Created,
            challenge.start_date,
            ActivityDetail::Challenge {
                challenge_id: challenge.id,
                challenge_name: challenge.name.clone(),
            },
        );

        if challenge.is_completed {
            feed.push(
                ActivityType::Completed,
                challenge.end_date,
                ActivityDetail::Challenge {
                    challenge_id: challenge.id,
                    challenge_name: challenge.name.clone(),
                },
            );
        }

        for task in &item.tasks {
            for entry in &task.entries {
                feed.push(
                    progress_activity_type(entry.status),
                    entry.date,
                    ActivityDetail::Task {
                        challenge_id: challenge.id,
                        challenge_name: challenge.name.clone(),
                        task_id: task.id,
                        task_name: task.name.clone(),
                        progress_id: entry.id,
                        hours_spent: entry.minutes_spent.map(minutes_to_hours).unwrap_or(0.0),
                        status: entry.status,
                    },
                );
            }
        }
    }

    let names: HashMap<DbId, &str> = history
        .iter()
        .map(|c| (c.challenge.id, c.challenge.name.as_str()))
        .collect();

    for badge in badges {
        let challenge_name = match badge.challenge_id {
            None => ACCOUNT_BADGE_LABEL,
            Some(id) => names.get(&id).copied().unwrap_or(UNKNOWN_CHALLENGE_LABEL),
        };
        feed.push(
            ActivityType::Badge,
            badge.earned_at,
            ActivityDetail::Badge {
                badge_id: badge.id,
                badge_name: badge.name.clone(),
                description: badge.description.clone(),
                challenge_name: challenge_name.to_string(),
            },
        );
    }

    let mut items = feed.items;
    items.sort_by(|a, b| b.date.cmp(&a.date));
    items
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::challenge::ChallengeSnapshot;
    use crate::history::{ProgressEntry, TaskHistory};

    fn day(d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, d, 10, 0, 0).unwrap()
    }

    fn history(is_completed: bool, entries: Vec<ProgressEntry>) -> ChallengeHistory {
        ChallengeHistory {
            challenge: ChallengeSnapshot {
                id: 1,
                user_id: 1,
                name: "Meditate".to_string(),
                duration_days: 10,
                start_date: day(1),
                end_date: day(11),
                is_completed,
            },
            tasks: vec![TaskHistory {
                id: 10,
                name: "Sit for 10 minutes".to_string(),
                entries,
            }],
        }
    }

    fn entry(id: DbId, d: u32, status: ProgressStatus, minutes: Option<i32>) -> ProgressEntry {
        ProgressEntry {
            id,
            date: day(d),
            status,
            minutes_spent: minutes,
        }
    }

    fn badge(id: DbId, d: u32, challenge_id: Option<DbId>) -> EarnedBadge {
        EarnedBadge {
            id,
            name: "7-Day Streak".to_string(),
            description: "Kept going".to_string(),
            challenge_id,
            earned_at: day(d),
        }
    }

    #[test]
    fn merges_three_sources_newest_first() {
        let h = history(false, vec![entry(100, 3, ProgressStatus::Completed, Some(30))]);
        let items = reconstruct_activity(&[h], &[badge(5, 5, Some(1))]);

        let kinds: Vec<ActivityType> = items.iter().map(|i| i.activity_type).collect();
        assert_eq!(
            kinds,
            vec![
                ActivityType::Badge,
                ActivityType::Completed,
                ActivityType::Created
            ]
        );
        let dates: Vec<Timestamp> = items.iter().map(|i| i.date).collect();
        assert_eq!(dates, vec![day(5), day(3), day(1)]);
    }

    #[test]
    fn ids_follow_generation_order() {
        let h = history(false, vec![entry(100, 3, ProgressStatus::Completed, None)]);
        let items = reconstruct_activity(&[h], &[badge(5, 5, Some(1))]);
        // created=1, progress=2, badge=3; sorted newest first.
        let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn completed_challenge_adds_end_date_item() {
        let items = reconstruct_activity(&[history(true, vec![])], &[]);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].activity_type, ActivityType::Completed);
        assert_eq!(items[0].date, day(11));
        assert!(matches!(items[0].detail, ActivityDetail::Challenge { .. }));
    }

    #[test]
    fn partial_and_no_action_become_missed() {
        let h = history(
            false,
            vec![
                entry(1, 2, ProgressStatus::Partial, None),
                entry(2, 3, ProgressStatus::NoAction, None),
            ],
        );
        let items = reconstruct_activity(&[h], &[]);
        let missed: Vec<&ActivityItem> = items
            .iter()
            .filter(|i| i.activity_type == ActivityType::Missed)
            .collect();
        assert_eq!(missed.len(), 2);
        assert_matches::assert_matches!(
            &missed[0].detail,
            ActivityDetail::Task { status: ProgressStatus::NoAction, .. }
        );
    }

    #[test]
    fn task_items_carry_hours() {
        let h = history(false, vec![entry(1, 2, ProgressStatus::Completed, Some(150))]);
        let items = reconstruct_activity(&[h], &[]);
        let task_item = items
            .iter()
            .find(|i| matches!(i.detail, ActivityDetail::Task { .. }))
            .unwrap();
        assert_matches::assert_matches!(
            &task_item.detail,
            ActivityDetail::Task { hours_spent, task_name, .. }
                if *hours_spent == 2.5 && task_name == "Sit for 10 minutes"
        );
    }

    #[test]
    fn badge_labels_fall_back() {
        let items = reconstruct_activity(&[], &[badge(1, 2, None), badge(2, 1, Some(99))]);
        let labels: Vec<String> = items
            .iter()
            .map(|i| match &i.detail {
                ActivityDetail::Badge { challenge_name, .. } => challenge_name.clone(),
                other => panic!("unexpected detail {other:?}"),
            })
            .collect();
        assert_eq!(labels, vec![ACCOUNT_BADGE_LABEL, UNKNOWN_CHALLENGE_LABEL]);
    }

    #[test]
    fn equal_dates_keep_generation_order() {
        let h = history(false, vec![entry(1, 1, ProgressStatus::Completed, None)]);
        let items = reconstruct_activity(&[h], &[badge(9, 1, Some(1))]);
        let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn serializes_type_and_flattened_detail() {
        let items = reconstruct_activity(&[history(false, vec![])], &[]);
        let json = serde_json::to_value(&items[0]).unwrap();
        assert_eq!(json["type"], "created");
        assert_eq!(json["challenge_name"], "Meditate");
        assert_eq!(json["id"], 1);
    }
}
