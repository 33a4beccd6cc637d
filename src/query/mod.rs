//! Filter state types (noun module)

mod error;
mod filter;
mod period;
mod request;

pub use error::FilterError;
pub use filter::{FilterSet, FilterSetBuilder};
pub use period::Period;
pub use request::{DashboardRequest, ALL_SENTINEL};
