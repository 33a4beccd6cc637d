//! Query builder (verb module)
//!
//! Transforms filter state into parameterized query descriptors.

mod build;
mod descriptor;
mod error;

pub use build::{
    build_time_series_query, build_hierarchy_query, build_hierarchy_query_from_strs,
    build_comparison_query, VALUE_ALIAS, PERIOD_ALIAS,
    PARAM_REGIONS, PARAM_CATEGORIES, PARAM_DATE_START, PARAM_DATE_END,
};
pub use descriptor::{QueryDescriptor, ParamValue};
pub use error::BuildError;
