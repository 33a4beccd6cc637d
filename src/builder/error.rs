//! Builder errors

use std::fmt;
use crate::emitter::EmitError;

#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// Period string is not `YYYY-MM`
    InvalidPeriod(String),
    /// Column name is not a plain SQL identifier
    InvalidIdentifier(String),
    /// Comparison queries need both date bounds
    MissingDateRange,
    /// No hierarchy levels and no periods
    EmptyQuery,
    /// SQL emission failed
    Emit(EmitError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidPeriod(s) => {
                write!(f, "Invalid period '{}', expected YYYY-MM", s)
            }
            BuildError::InvalidIdentifier(s) => {
                write!(f, "'{}' is not a valid column name", s)
            }
            BuildError::MissingDateRange => {
                write!(f, "Comparison queries require both a start and an end date")
            }
            BuildError::EmptyQuery => {
                write!(f, "Query must have at least one hierarchy level or period")
            }
            BuildError::Emit(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Emit(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EmitError> for BuildError {
    fn from(err: EmitError) -> Self {
        BuildError::Emit(err)
    }
}
