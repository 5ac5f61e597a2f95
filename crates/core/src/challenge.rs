//! Challenge lifecycle: creation validation, calendar math, and temporal state.
//!
//! A challenge starts on the day it is created (day 1) and runs for a fixed
//! number of calendar days. Everything here takes an explicit `as_of` so the
//! same rules can be evaluated for "now" in handlers and for fixed dates in
//! tests.

use std::sync::LazyLock;

use chrono::Days;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a challenge or task name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of a category tag.
pub const MAX_CATEGORY_LENGTH: usize = 50;

const SECONDS_PER_DAY: i64 = 86_400;

/// `HH:MM`, 24-hour clock.
static SCHEDULED_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The fields of a stored challenge that lifecycle and badge rules need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeSnapshot {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub duration_days: i32,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub is_completed: bool,
}

/// Derived temporal state of a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    /// Still inside its date window and not yet marked completed.
    InProgress,
    /// Past its end date but never marked completed.
    Expired,
    Completed,
}

/// "Day N of M" view of a challenge at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChallengeTimeline {
    pub current_day: i32,
    pub duration_days: i32,
    pub days_remaining: i32,
    pub progress_pct: u8,
    pub status: ChallengeStatus,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a challenge or task name: non-blank and bounded.
pub fn validate_name(kind: &str, name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{kind} name must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{kind} name must not exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the free-form category tag.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Category must not be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_CATEGORY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category must not exceed {MAX_CATEGORY_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the challenge length. Duration is a positive number of days.
pub fn validate_duration(duration_days: i32) -> Result<(), CoreError> {
    if duration_days < 1 {
        return Err(CoreError::Validation(format!(
            "Duration must be at least 1 day (got {duration_days})"
        )));
    }
    Ok(())
}

/// Validate an optional `HH:MM` scheduled time label.
pub fn validate_scheduled_time(time: &str) -> Result<(), CoreError> {
    if SCHEDULED_TIME_RE.is_match(time) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Scheduled time '{time}' must use the HH:MM 24-hour format"
        )))
    }
}

/// Validate everything about a new challenge that does not depend on storage.
///
/// A challenge must commit to at least one task up front; tasks cannot be
/// added or removed later.
pub fn validate_new_challenge(
    name: &str,
    category: &str,
    duration_days: i32,
    task_count: usize,
) -> Result<(), CoreError> {
    validate_name("Challenge", name)?;
    validate_category(category)?;
    validate_duration(duration_days)?;
    if task_count == 0 {
        return Err(CoreError::Validation(
            "A challenge needs at least one task".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Calendar math
// ---------------------------------------------------------------------------

/// Compute the stored end date: `start + duration` calendar days.
pub fn compute_end_date(start: Timestamp, duration_days: i32) -> Result<Timestamp, CoreError> {
    validate_duration(duration_days)?;
    start
        .checked_add_days(Days::new(duration_days as u64))
        .ok_or_else(|| CoreError::Validation("Challenge end date is out of range".to_string()))
}

/// Whole days between `start` and `as_of`, floored. Negative before start.
pub fn days_since_start(start: Timestamp, as_of: Timestamp) -> i64 {
    (as_of - start).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Current day number of the challenge, 1-based, clamped to `[1, duration]`.
pub fn elapsed_days(start: Timestamp, duration_days: i32, as_of: Timestamp) -> i32 {
    let duration = i64::from(duration_days.max(1));
    let day = (days_since_start(start, as_of) + 1).clamp(1, duration);
    day as i32
}

/// Share of the challenge window that has elapsed, 0-100.
pub fn progress_percentage(start: Timestamp, duration_days: i32, as_of: Timestamp) -> u8 {
    let duration = duration_days.max(1);
    let elapsed = elapsed_days(start, duration, as_of);
    let pct = (f64::from(elapsed) / f64::from(duration) * 100.0).round();
    pct.min(100.0) as u8
}

impl ChallengeSnapshot {
    pub fn elapsed_days(&self, as_of: Timestamp) -> i32 {
        elapsed_days(self.start_date, self.duration_days, as_of)
    }

    pub fn progress_percentage(&self, as_of: Timestamp) -> u8 {
        progress_percentage(self.start_date, self.duration_days, as_of)
    }

    /// Whether the final day has been reached or passed.
    pub fn final_day_reached(&self, as_of: Timestamp) -> bool {
        self.duration_days <= self.elapsed_days(as_of)
    }

    pub fn status(&self, as_of: Timestamp) -> ChallengeStatus {
        if self.is_completed {
            ChallengeStatus::Completed
        } else if as_of >= self.end_date {
            ChallengeStatus::Expired
        } else {
            ChallengeStatus::InProgress
        }
    }

    /// Build the "day N of M" view used by challenge listings.
    pub fn timeline(&self, as_of: Timestamp) -> ChallengeTimeline {
        let current_day = self.elapsed_days(as_of);
        ChallengeTimeline {
            current_day,
            duration_days: self.duration_days,
            days_remaining: (self.duration_days - current_day).max(0),
            progress_pct: self.progress_percentage(as_of),
            status: self.status(as_of),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
