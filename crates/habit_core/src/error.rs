use chrono::NaiveDate;
use thiserror::Error;

/// Rejections raised when a habit candidate fails a creation invariant.
///
/// These are surfaced synchronously and never persisted; a rejected mutation
/// leaves the registry untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("habit label must not be empty")]
    EmptyLabel,
    #[error("a habit named `{0}` already exists")]
    DuplicateLabel(String),
    #[error("habit start date is required")]
    MissingStartDate,
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}
