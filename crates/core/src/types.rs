/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A calendar day with no time-of-day component.
pub type CalendarDate = chrono::NaiveDate;

/// Normalize a timestamp to its UTC calendar date.
///
/// Every day-granularity comparison in the domain goes through this so two
/// entries logged at different times on the same day compare equal.
pub fn calendar_date(ts: Timestamp) -> CalendarDate {
    ts.date_naive()
}
