//! Execution seam (verb module)
//!
//! The library never talks to a database itself. Callers provide a
//! [`RowExecutor`] and a [`Dashboard`] wires it to the builders and tables.

mod dashboard;
mod error;

pub use dashboard::{Dashboard, RowExecutor};
pub use error::DashboardError;
