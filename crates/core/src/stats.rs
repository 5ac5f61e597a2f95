//! Dashboard statistics folded from a user's challenge history.

use serde::Serialize;

use crate::history::ChallengeHistory;
use crate::progress::optional_minutes_to_hours;
use crate::streak::StreakSummary;

/// Summary counters shown on the user dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct UserStats {
    pub active_challenges: u32,
    pub completed_tasks: u32,
    pub total_tasks: u32,
    pub hours_logged: f64,
    pub badges_count: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Fold a user's history into [`UserStats`].
///
/// Tasks count once each toward `total_tasks`, and once toward
/// `completed_tasks` if any entry is completed. Hours sum every entry
/// regardless of status.
pub fn fold_user_stats(
    history: &[ChallengeHistory],
    badges_count: u32,
    streaks: StreakSummary,
) -> UserStats {
    let mut stats = UserStats {
        badges_count,
        current_streak: streaks.current_streak,
        longest_streak: streaks.longest_streak,
        ..UserStats::default()
    };

    for item in history {
        if !item.challenge.is_completed {
            stats.active_challenges += 1;
        }
        for task in &item.tasks {
            stats.total_tasks += 1;
            if task.has_completion() {
                stats.completed_tasks += 1;
            }
            stats.hours_logged += task
                .entries
                .iter()
                .map(|e| optional_minutes_to_hours(e.minutes_spent))
                .sum::<f64>();
        }
    }

    stats
}
