//! Query building logic
//!
//! Each function resolves catalog keys (never failing on unknown ones),
//! assembles a SelectQuery, and emits it with its bound parameters.

use std::collections::BTreeMap;
use crate::catalog::{Catalog, CompareDimension, QueryShape, TimeDimension};
use crate::emitter::emit_sql;
use crate::plan::{is_identifier, BinaryOperator, Expr, SelectQuery, SortDirection};
use crate::query::{FilterSet, Period};
use super::descriptor::{ParamValue, QueryDescriptor};
use super::error::BuildError;

/// Output alias of the aggregated value
pub const VALUE_ALIAS: &str = "valeur";
/// Output alias of the period bucket
pub const PERIOD_ALIAS: &str = "periode";

pub const PARAM_REGIONS: &str = "regions";
pub const PARAM_CATEGORIES: &str = "categories";
pub const PARAM_DATE_START: &str = "date_debut";
pub const PARAM_DATE_END: &str = "date_fin";

/// Build a time-series query: one value per period, optionally split by
/// the granularity's grouping columns.
///
/// ```text
/// SELECT SUM(montant_vente) AS "valeur", DATE_TRUNC('month', date_vente) AS "periode", categorie_principale
/// FROM sales.ventes
/// WHERE region_id = ANY(:regions)
/// GROUP BY DATE_TRUNC('month', date_vente), categorie_principale
/// ORDER BY periode ASC, categorie_principale ASC
/// ```
pub fn build_time_series_query(
    catalog: &Catalog,
    indicator: &str,
    filters: &FilterSet,
    granularity: &str,
    time_dimension: &str,
) -> Result<QueryDescriptor, BuildError> {
    let indicator = catalog.resolve_indicator(indicator, QueryShape::TimeSeries);
    let bucket = TimeDimension::resolve(time_dimension).truncate(&catalog.columns.date);
    let dimensions = catalog.granularity_columns(granularity);

    let mut params = BTreeMap::new();
    let mut query = SelectQuery::new(&catalog.table)
        .project(indicator.aggregate_expr(), Some(VALUE_ALIAS))
        .project(bucket.clone(), Some(PERIOD_ALIAS))
        .filters(filter_predicates(catalog, filters, &mut params))
        .group_by(bucket)
        .order_by(PERIOD_ALIAS, SortDirection::Ascending);

    for column in dimensions {
        query = query
            .project(Expr::column(column), None)
            .group_by(Expr::column(column))
            .order_by(column, SortDirection::Ascending);
    }

    finish(QueryShape::TimeSeries, &query, params)
}

/// Build a hierarchy pivot query: one row per hierarchy combination, one
/// column per requested month.
///
/// Period values are written into the SQL text as literals because they
/// select output columns. [`Period`] only admits `YYYY-MM`, which is what
/// makes this safe.
pub fn build_hierarchy_query<S: AsRef<str>>(
    catalog: &Catalog,
    indicator: &str,
    filters: &FilterSet,
    hierarchy_levels: &[S],
    periods: &[Period],
) -> Result<QueryDescriptor, BuildError> {
    if hierarchy_levels.is_empty() && periods.is_empty() {
        return Err(BuildError::EmptyQuery);
    }
    for level in hierarchy_levels {
        if !is_identifier(level.as_ref()) {
            return Err(BuildError::InvalidIdentifier(level.as_ref().to_string()));
        }
    }

    let indicator = catalog.resolve_indicator(indicator, QueryShape::Hierarchy);
    let month = TimeDimension::Month.truncate(&catalog.columns.date);

    let mut query = SelectQuery::new(&catalog.table);
    for level in hierarchy_levels {
        query = query.project(Expr::column(level.as_ref()), None);
    }
    for period in periods {
        let in_period = Expr::binary(
            month.clone(),
            BinaryOperator::Eq,
            Expr::timestamp(period.first_day()),
        );
        let alias = period.to_string();
        query = query.project(indicator.filtered_aggregate_expr(in_period), Some(alias.as_str()));
    }

    let mut params = BTreeMap::new();
    query = query.filters(filter_predicates(catalog, filters, &mut params));
    for level in hierarchy_levels {
        query = query
            .group_by(Expr::column(level.as_ref()))
            .order_by(level.as_ref(), SortDirection::Ascending);
    }

    finish(QueryShape::Hierarchy, &query, params)
}

/// Same as [`build_hierarchy_query`], validating raw period strings first
pub fn build_hierarchy_query_from_strs<S: AsRef<str>, P: AsRef<str>>(
    catalog: &Catalog,
    indicator: &str,
    filters: &FilterSet,
    hierarchy_levels: &[S],
    periods: &[P],
) -> Result<QueryDescriptor, BuildError> {
    let periods = periods
        .iter()
        .map(|p| Period::parse(p.as_ref()).map_err(|_| BuildError::InvalidPeriod(p.as_ref().to_string())))
        .collect::<Result<Vec<_>, _>>()?;
    build_hierarchy_query(catalog, indicator, filters, hierarchy_levels, &periods)
}

/// Build a period comparison query (e.g. 2023 vs 2024).
///
/// Unlike the other shapes the date range is mandatory, and only the date
/// range restricts rows.
pub fn build_comparison_query(
    catalog: &Catalog,
    indicator: &str,
    filters: &FilterSet,
    compare_dimension: &str,
) -> Result<QueryDescriptor, BuildError> {
    let (start, end) = filters.date_range().ok_or(BuildError::MissingDateRange)?;

    let indicator = catalog.resolve_indicator(indicator, QueryShape::Comparison);
    let label = CompareDimension::resolve(compare_dimension).label(&catalog.columns.date);

    let mut params = BTreeMap::new();
    params.insert(PARAM_DATE_START.to_string(), ParamValue::Date(start));
    params.insert(PARAM_DATE_END.to_string(), ParamValue::Date(end));

    let query = SelectQuery::new(&catalog.table)
        .project(label.clone(), Some(PERIOD_ALIAS))
        .project(indicator.aggregate_expr(), Some(VALUE_ALIAS))
        .filter(Expr::Between {
            expr: Box::new(Expr::column(&catalog.columns.date)),
            low: Box::new(Expr::param(PARAM_DATE_START)),
            high: Box::new(Expr::param(PARAM_DATE_END)),
        })
        .group_by(label)
        .order_by(PERIOD_ALIAS, SortDirection::Ascending);

    finish(QueryShape::Comparison, &query, params)
}

/// WHERE predicates for the filters that are set, binding their values
fn filter_predicates(
    catalog: &Catalog,
    filters: &FilterSet,
    params: &mut BTreeMap<String, ParamValue>,
) -> Vec<Expr> {
    let mut predicates = Vec::new();

    if !filters.region().is_empty() {
        predicates.push(Expr::AnyOf {
            expr: Box::new(Expr::column(&catalog.columns.region)),
            param: PARAM_REGIONS.to_string(),
        });
        params.insert(PARAM_REGIONS.to_string(), ParamValue::List(filters.region().to_vec()));
    }

    if !filters.categories().is_empty() {
        predicates.push(Expr::AnyOf {
            expr: Box::new(Expr::column(&catalog.columns.category)),
            param: PARAM_CATEGORIES.to_string(),
        });
        params.insert(PARAM_CATEGORIES.to_string(), ParamValue::List(filters.categories().to_vec()));
    }

    if let Some(start) = filters.date_start() {
        predicates.push(Expr::binary(
            Expr::column(&catalog.columns.date),
            BinaryOperator::GtEq,
            Expr::param(PARAM_DATE_START),
        ));
        params.insert(PARAM_DATE_START.to_string(), ParamValue::Date(start));
    }

    if let Some(end) = filters.date_end() {
        predicates.push(Expr::binary(
            Expr::column(&catalog.columns.date),
            BinaryOperator::LtEq,
            Expr::param(PARAM_DATE_END),
        ));
        params.insert(PARAM_DATE_END.to_string(), ParamValue::Date(end));
    }

    predicates
}

fn finish(
    shape: QueryShape,
    query: &SelectQuery,
    params: BTreeMap<String, ParamValue>,
) -> Result<QueryDescriptor, BuildError> {
    let sql = emit_sql(query)?;
    let descriptor = QueryDescriptor {
        sql,
        params,
        columns: query.output_names(),
    };
    tracing::debug!(
        %shape,
        sql_len = descriptor.sql.len(),
        params = ?descriptor.param_names(),
        "built query"
    );
    Ok(descriptor)
}
