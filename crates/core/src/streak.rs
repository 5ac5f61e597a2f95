//! Completion streaks over calendar days.
//!
//! A streak is a run of consecutive calendar days on which at least one
//! completed progress entry exists. Multiple completions on the same day
//! collapse into a single satisfied day before runs are measured.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::CalendarDate;

/// Current and longest streak lengths, in days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Compute streaks from the dates of completed entries.
///
/// `current_streak` is the run ending `today`. When today has no completion
/// yet the run ending yesterday still counts, so a streak is not reported as
/// broken before the day is over. Dates after `today` never contribute to the
/// current streak but do count toward the longest run.
pub fn compute_streaks<I>(completed_dates: I, today: CalendarDate) -> StreakSummary
where
    I: IntoIterator<Item = CalendarDate>,
{
    let days: BTreeSet<CalendarDate> = completed_dates.into_iter().collect();
    if days.is_empty() {
        return StreakSummary::default();
    }

    StreakSummary {
        current_streak: current_run(&days, today),
        longest_streak: longest_run(&days),
    }
}

fn longest_run(days: &BTreeSet<CalendarDate>) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<CalendarDate> = None;

    for &day in days {
        run = match prev.and_then(|p| p.succ_opt()) {
            Some(next) if next == day => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }
    longest
}

fn current_run(days: &BTreeSet<CalendarDate>, today: CalendarDate) -> u32 {
    let anchor = if days.contains(&today) {
        Some(today)
    } else {
        today.pred_opt().filter(|yesterday| days.contains(yesterday))
    };

    let mut run = 0u32;
    let mut cursor = anchor;
    while let Some(day) = cursor {
        if !days.contains(&day) {
            break;
        }
        run += 1;
        cursor = day.pred_opt();
    }
    run
}
