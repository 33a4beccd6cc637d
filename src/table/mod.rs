//! Result shaping (verb module)
//!
//! Transforms flat result rows into hierarchical tables, pivots and
//! comparison tables ready for display.

mod comparison;
mod error;
mod format;
mod hierarchy;
mod pivot;
mod value;

pub use comparison::{build_comparison_table, ComparisonRow, ComparisonTable};
pub use error::TableError;
pub use format::{format_amount, format_optional, PLACEHOLDER, THOUSANDS_SEPARATOR};
pub use hierarchy::{build_hierarchy_table, HierarchyRow, MetricCell, GRAND_TOTAL_LABEL, MAX_HIERARCHY_DEPTH};
pub use pivot::{build_pivot, PivotRow, PivotTable};
pub use value::{Row, Value};
