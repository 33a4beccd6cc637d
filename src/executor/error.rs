//! Dashboard errors

use std::fmt;
use crate::builder::BuildError;
use crate::query::FilterError;
use crate::table::TableError;

/// Any failure along request → query → rows → table.
///
/// `E` is the executor's own error type, passed through unchanged.
#[derive(Debug)]
pub enum DashboardError<E> {
    Filter(FilterError),
    Build(BuildError),
    Table(TableError),
    Execute(E),
}

impl<E: fmt::Display> fmt::Display for DashboardError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Filter(err) => write!(f, "Invalid filters: {}", err),
            DashboardError::Build(err) => write!(f, "Query build failed: {}", err),
            DashboardError::Table(err) => write!(f, "Result shaping failed: {}", err),
            DashboardError::Execute(err) => write!(f, "Query execution failed: {}", err),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for DashboardError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Filter(err) => Some(err),
            DashboardError::Build(err) => Some(err),
            DashboardError::Table(err) => Some(err),
            DashboardError::Execute(err) => Some(err),
        }
    }
}

impl<E> From<FilterError> for DashboardError<E> {
    fn from(err: FilterError) -> Self {
        DashboardError::Filter(err)
    }
}

impl<E> From<BuildError> for DashboardError<E> {
    fn from(err: BuildError) -> Self {
        DashboardError::Build(err)
    }
}

impl<E> From<TableError> for DashboardError<E> {
    fn from(err: TableError) -> Self {
        DashboardError::Table(err)
    }
}
