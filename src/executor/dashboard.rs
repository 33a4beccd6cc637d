//! Dashboard composition: request → query → executor → shaped table

use crate::builder::{
    build_comparison_query, build_hierarchy_query_from_strs, build_time_series_query,
    BuildError, QueryDescriptor, PERIOD_ALIAS, VALUE_ALIAS,
};
use crate::catalog::{Aggregation, Catalog};
use crate::query::{DashboardRequest, Period};
use crate::table::{
    build_hierarchy_table, build_pivot, HierarchyRow, PivotTable, Row, TableError, MAX_HIERARCHY_DEPTH,
};
use super::error::DashboardError;

/// Runs a query descriptor against a database and returns its rows.
///
/// Implementations bind `descriptor.params` to the `:name` placeholders of
/// `descriptor.sql`. Calls are blocking; timeouts and retries are up to
/// the implementation.
pub trait RowExecutor {
    type Error: std::error::Error;

    fn execute(&self, descriptor: &QueryDescriptor) -> Result<Vec<Row>, Self::Error>;
}

impl<T: RowExecutor + ?Sized> RowExecutor for &T {
    type Error = T::Error;

    fn execute(&self, descriptor: &QueryDescriptor) -> Result<Vec<Row>, Self::Error> {
        (**self).execute(descriptor)
    }
}

/// A catalog bound to an executor
#[derive(Debug, Clone)]
pub struct Dashboard<E> {
    catalog: Catalog,
    executor: E,
}

type DashboardResult<T, E> = Result<T, DashboardError<<E as RowExecutor>::Error>>;

impl<E: RowExecutor> Dashboard<E> {
    pub fn new(catalog: Catalog, executor: E) -> Self {
        Self { catalog, executor }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Rows of the time-series chart: `valeur`, `periode` and the
    /// granularity's columns
    pub fn time_series(&self, request: &DashboardRequest) -> DashboardResult<Vec<Row>, E> {
        let filters = request.filters()?;
        let descriptor = build_time_series_query(
            &self.catalog,
            &request.indicator,
            &filters,
            &request.granularity,
            request.time_dimension(),
        )?;
        self.run("time_series", &descriptor)
    }

    /// Hierarchical table with one metric column per requested month
    pub fn hierarchy_table<S: AsRef<str>, P: AsRef<str>>(
        &self,
        request: &DashboardRequest,
        levels: &[S],
        periods: &[P],
    ) -> DashboardResult<Vec<HierarchyRow>, E> {
        if !(1..=MAX_HIERARCHY_DEPTH).contains(&levels.len()) {
            return Err(TableError::HierarchyDepth(levels.len()).into());
        }
        let filters = request.filters()?;
        let descriptor =
            build_hierarchy_query_from_strs(&self.catalog, &request.indicator, &filters, levels, periods)?;
        let rows = self.run("hierarchy", &descriptor)?;

        // period columns come back under their normalized YYYY-MM alias
        let metrics = &descriptor.columns[levels.len()..];
        Ok(build_hierarchy_table(&rows, levels, metrics)?)
    }

    /// [`Dashboard::hierarchy_table`] with one column per month of the
    /// request's date range
    pub fn monthly_hierarchy_table<S: AsRef<str>>(
        &self,
        request: &DashboardRequest,
        levels: &[S],
    ) -> DashboardResult<Vec<HierarchyRow>, E> {
        let (start, end) = request.filters()?.date_range().ok_or(BuildError::MissingDateRange)?;
        let periods: Vec<String> = Period::months_between(start, end).iter().map(Period::to_string).collect();
        self.hierarchy_table(request, levels, &periods)
    }

    /// Time series spread into a pivot: `index` rows, one column per
    /// distinct `column_key` value (usually `periode`)
    pub fn pivot<S: AsRef<str>>(
        &self,
        request: &DashboardRequest,
        index: &[S],
        column_key: &str,
    ) -> DashboardResult<PivotTable, E> {
        let rows = self.time_series(request)?;
        Ok(build_pivot(&rows, index, column_key, VALUE_ALIAS, Aggregation::Sum)?)
    }

    /// Same as [`Dashboard::pivot`] with periods as columns
    pub fn pivot_by_period<S: AsRef<str>>(&self, request: &DashboardRequest, index: &[S]) -> DashboardResult<PivotTable, E> {
        self.pivot(request, index, PERIOD_ALIAS)
    }

    /// One `valeur` per compared period (`periode`)
    pub fn comparison(&self, request: &DashboardRequest, compare_dimension: &str) -> DashboardResult<Vec<Row>, E> {
        let filters = request.filters()?;
        let descriptor = build_comparison_query(&self.catalog, &request.indicator, &filters, compare_dimension)?;
        self.run("comparison", &descriptor)
    }

    fn run(&self, shape: &str, descriptor: &QueryDescriptor) -> DashboardResult<Vec<Row>, E> {
        match self.executor.execute(descriptor) {
            Ok(rows) => {
                tracing::info!(shape, rows = rows.len(), "query executed");
                Ok(rows)
            }
            Err(err) => {
                tracing::warn!(shape, error = %err, "query execution failed");
                Err(DashboardError::Execute(err))
            }
        }
    }
}
