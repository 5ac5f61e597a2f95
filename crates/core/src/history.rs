//! Pre-loaded view of a user's challenges, tasks, and progress entries.
//!
//! The stats fold and the activity reconstructor both walk this tree. The
//! API layer builds it from repository rows; tests build it by hand.

use crate::challenge::ChallengeSnapshot;
use crate::progress::ProgressStatus;
use crate::types::{calendar_date, CalendarDate, DbId, Timestamp};

/// One dated progress report for a task.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEntry {
    pub id: DbId,
    pub date: Timestamp,
    pub status: ProgressStatus,
    pub minutes_spent: Option<i32>,
}

/// A task and every progress entry logged against it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskHistory {
    pub id: DbId,
    pub name: String,
    pub entries: Vec<ProgressEntry>,
}

impl TaskHistory {
    /// A task counts as completed once any of its entries is completed.
    pub fn has_completion(&self) -> bool {
        self.entries.iter().any(|e| e.status.is_completed())
    }
}

/// A challenge with its tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeHistory {
    pub challenge: ChallengeSnapshot,
    pub tasks: Vec<TaskHistory>,
}

/// Calendar dates of every completed entry across all challenges.
pub fn completed_dates(history: &[ChallengeHistory]) -> Vec<CalendarDate> {
    history
        .iter()
        .flat_map(|c| c.tasks.iter())
        .flat_map(|t| t.entries.iter())
        .filter(|e| e.status.is_completed())
        .map(|e| calendar_date(e.date))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn entry(id: DbId, day: u32, hour: u32, status: ProgressStatus) -> ProgressEntry {
        ProgressEntry {
            id,
            date: Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap(),
            status,
            minutes_spent: None,
        }
    }

    #[test]
    fn task_with_any_completed_entry_counts() {
        let task = TaskHistory {
            id: 1,
            name: "Stretch".to_string(),
            entries: vec![
                entry(1, 1, 8, ProgressStatus::Partial),
                entry(2, 2, 8, ProgressStatus::Completed),
            ],
        };
        assert!(task.has_completion());
    }

    #[test]
    fn task_without_entries_has_no_completion() {
        let task = TaskHistory {
            id: 1,
            name: "Stretch".to_string(),
            entries: vec![],
        };
        assert!(!task.has_completion());
    }

    #[test]
    fn completed_dates_normalize_to_calendar_day() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let history = vec![ChallengeHistory {
            challenge: ChallengeSnapshot {
                id: 1,
                user_id: 1,
                name: "Read".to_string(),
                duration_days: 7,
                start_date: start,
                end_date: start + chrono::Duration::days(7),
                is_completed: false,
            },
            tasks: vec![TaskHistory {
                id: 1,
                name: "Read 20 pages".to_string(),
                entries: vec![
                    entry(1, 3, 7, ProgressStatus::Completed),
                    entry(2, 3, 22, ProgressStatus::Completed),
                    entry(3, 4, 9, ProgressStatus::NoAction),
                ],
            }],
        }];

        let dates = completed_dates(&history);
        let jan3 = CalendarDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(dates, vec![jan3, jan3]);
    }
}
