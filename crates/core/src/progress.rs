//! Task progress status and time-spent conversion.
//!
//! Time spent is persisted in whole minutes and converted to hours only at
//! the presentation/aggregation boundary.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_PARTIAL: &str = "partial";
pub const STATUS_NO_ACTION: &str = "no-action";

/// All valid progress status strings as stored in the database.
pub const VALID_STATUSES: &[&str] = &[STATUS_COMPLETED, STATUS_PARTIAL, STATUS_NO_ACTION];

/// A single entry reports on one calendar day.
pub const MAX_HOURS_PER_ENTRY: f64 = 24.0;

const MINUTES_PER_HOUR: f64 = 60.0;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Completion state reported by one progress entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Completed,
    Partial,
    #[serde(rename = "no-action", alias = "no_action")]
    NoAction,
}

impl ProgressStatus {
    /// Convert from a stored or submitted string value.
    ///
    /// Also accepts the underscored `no_action` spelling.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_COMPLETED => Ok(Self::Completed),
            STATUS_PARTIAL => Ok(Self::Partial),
            STATUS_NO_ACTION | "no_action" => Ok(Self::NoAction),
            _ => Err(CoreError::Validation(format!(
                "Invalid progress status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => STATUS_COMPLETED,
            Self::Partial => STATUS_PARTIAL,
            Self::NoAction => STATUS_NO_ACTION,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

// ---------------------------------------------------------------------------
// Time spent
// ---------------------------------------------------------------------------

/// Convert a submitted hours value into persisted minutes.
///
/// Rounds to the nearest whole minute. Negative, non-finite, or
/// more-than-a-day values are rejected rather than coerced.
pub fn hours_to_minutes(hours: f64) -> Result<i32, CoreError> {
    if !hours.is_finite() {
        return Err(CoreError::Validation(
            "Hours spent must be a finite number".to_string(),
        ));
    }
    if hours < 0.0 {
        return Err(CoreError::Validation(
            "Hours spent must not be negative".to_string(),
        ));
    }
    if hours > MAX_HOURS_PER_ENTRY {
        return Err(CoreError::Validation(format!(
            "Hours spent must not exceed {MAX_HOURS_PER_ENTRY} for a single day"
        )));
    }
    Ok((hours * MINUTES_PER_HOUR).round() as i32)
}

/// Convert persisted minutes back into hours.
pub fn minutes_to_hours(minutes: i32) -> f64 {
    f64::from(minutes) / MINUTES_PER_HOUR
}

/// Same as [`minutes_to_hours`] for optional columns; absent counts as zero.
pub fn optional_minutes_to_hours(minutes: Option<i32>) -> f64 {
    minutes.map(minutes_to_hours).unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
