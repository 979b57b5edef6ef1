use chrono::NaiveDate;

/// Errors raised by the care domain services.
///
/// UI-facing operations (tapping a disabled cell, navigating past a bound)
/// degrade to a no-op instead of returning one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CareError {
    #[error("Date {date} is outside the allowed range {min:?}..={max:?}")]
    InvalidDateRange {
        date: NaiveDate,
        min: Option<NaiveDate>,
        max: Option<NaiveDate>,
    },
    #[error("Invalid month: {0}. Must be between 1 and 12")]
    InvalidMonth(u32),
    #[error("Year {0} is outside the selectable range")]
    InvalidYear(i32),
    #[error("Routine entry not found: {0}")]
    EntryNotFound(String),
    #[error("Schedule item not found: {0}")]
    ScheduleItemNotFound(String),
    #[error("No journal entry on {0}")]
    JournalEntryNotFound(NaiveDate),
}

pub type CareResult<T> = Result<T, CareError>;
