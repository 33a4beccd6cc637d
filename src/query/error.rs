use chrono::NaiveDate;
use std::fmt;

/// Errors that can occur while validating filter state
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Start date is after end date
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    /// Date string is not an ISO calendar date
    InvalidDate(String),
    /// Period string is not `YYYY-MM`
    InvalidPeriod(String),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidDateRange { start, end } => {
                write!(f, "Start date {} is after end date {}", start, end)
            }
            FilterError::InvalidDate(s) => write!(f, "Invalid date '{}', expected YYYY-MM-DD", s),
            FilterError::InvalidPeriod(s) => write!(f, "Invalid period '{}', expected YYYY-MM", s),
        }
    }
}

impl std::error::Error for FilterError {}
