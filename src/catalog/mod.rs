//! Catalog types (nouns)
//!
//! These types describe what the dashboard may ask for and how each choice
//! maps onto the fact table.

mod granularity;
mod indicator;
mod schema;
mod time;
mod types;

pub use granularity::Granularity;
pub use indicator::Indicator;
pub use schema::{Catalog, FactColumns, DEFAULT_INDICATOR};
pub use time::{TimeDimension, CompareDimension, UnknownDimensionError};
pub use types::{Aggregation, ParseAggregationError, QueryShape};
