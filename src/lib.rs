//! salesdash - Compile dashboard filter state to SQL and shape the results
//!
//! This library provides:
//! - Catalog definition types (indicators, granularities, time dimensions)
//! - Catalog parsing from YAML
//! - Filter validation
//! - Parameterized query construction (time series, hierarchy pivot, comparison)
//! - SQL emission
//! - Hierarchical tables, pivots and comparison tables over result rows
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `catalog/` - registries (Catalog, Indicator, Granularity, TimeDimension, CompareDimension)
//! - `query/` - filter state (FilterSet, Period, DashboardRequest)
//! - `plan/` - logical query types (SelectQuery, Expr)
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML → Catalog
//! - `builder/` - Catalog + FilterSet → QueryDescriptor
//! - `emitter/` - SelectQuery → SQL
//! - `table/` - Rows → HierarchyRow / PivotTable / ComparisonTable
//! - `executor/` - QueryDescriptor → Rows through an injected RowExecutor
//!
//! # Example
//!
//! ```ignore
//! use salesdash::{Catalog, FilterSet, build_time_series_query};
//!
//! let catalog = Catalog::default();
//! let filters = FilterSet::builder().regions(["nord"]).build()?;
//! let descriptor = build_time_series_query(&catalog, "ca_total", &filters, "categorie", "mois")?;
//! let rows = executor.execute(&descriptor)?;
//! ```

pub mod catalog;
pub mod query;
pub mod plan;
pub mod builder;
pub mod emitter;
pub mod parser;
pub mod table;
pub mod executor;
pub mod error;

// Re-export commonly used types
pub use catalog::{Catalog, Indicator, Granularity, TimeDimension, CompareDimension, QueryShape, Aggregation};
pub use query::{FilterSet, FilterSetBuilder, FilterError, Period, DashboardRequest};
pub use plan::{SelectQuery, Expr};
pub use builder::{
    build_time_series_query, build_hierarchy_query, build_hierarchy_query_from_strs,
    build_comparison_query, QueryDescriptor, ParamValue, BuildError,
};
pub use emitter::{emit_sql, EmitError};
pub use table::{
    build_hierarchy_table, build_pivot, build_comparison_table, format_amount,
    HierarchyRow, MetricCell, PivotTable, ComparisonTable, Row, Value, TableError,
};
pub use executor::{RowExecutor, Dashboard, DashboardError};
pub use error::ParseError;
