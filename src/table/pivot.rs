//! Pivot tables: index tuples down, distinct key values across

use std::collections::{BTreeMap, BTreeSet};
use serde::Serialize;
use crate::catalog::Aggregation;
use super::error::TableError;
use super::format::format_amount;
use super::value::{OrderedValues, Row, Value};

/// Result of [`build_pivot`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    pub index_columns: Vec<String>,
    /// Header of each value column, sorted by key value
    pub columns: Vec<String>,
    pub rows: Vec<PivotRow>,
}

/// One index tuple and its values, aligned with [`PivotTable::columns`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub index: Vec<Value>,
    pub values: Vec<f64>,
}

impl PivotTable {
    /// Value at an index tuple (compared by label) and column header
    pub fn get(&self, index: &[&str], column: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| r.index.len() == index.len() && r.index.iter().zip(index).all(|(v, l)| v.label() == *l))
            .map(|r| r.values[col])
    }

    /// Rows rendered for display: index labels followed by formatted values
    pub fn formatted_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                row.index
                    .iter()
                    .map(Value::label)
                    .chain(row.values.iter().map(|v| format_amount(*v)))
                    .collect()
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Running state of one pivot cell
#[derive(Debug, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
    min: Option<f64>,
    max: Option<f64>,
    distinct: BTreeSet<OrderedValues>,
}

impl Accumulator {
    fn push(&mut self, value: &Value) {
        if value.is_null() {
            return;
        }
        self.count += 1;
        self.distinct.insert(OrderedValues(vec![value.clone()]));
        if let Some(v) = value.as_f64() {
            self.sum += v;
            self.min = Some(self.min.map_or(v, |m| m.min(v)));
            self.max = Some(self.max.map_or(v, |m| m.max(v)));
        }
    }

    fn finish(&self, aggregation: Aggregation) -> f64 {
        match aggregation {
            Aggregation::Sum => self.sum,
            Aggregation::Avg if self.count == 0 => 0.0,
            Aggregation::Avg => self.sum / self.count as f64,
            Aggregation::Count => self.count as f64,
            Aggregation::CountDistinct => self.distinct.len() as f64,
            Aggregation::Min => self.min.unwrap_or(0.0),
            Aggregation::Max => self.max.unwrap_or(0.0),
        }
    }
}

/// Pivot rows: group by `index_columns`, spread the distinct values of
/// `column_key` as columns and aggregate `value_column` into each cell.
///
/// Index tuples and columns are sorted ascending. Combinations with no
/// rows are `0`. Rows whose index or key is null are dropped.
pub fn build_pivot<S: AsRef<str>>(
    rows: &[Row],
    index_columns: &[S],
    column_key: &str,
    value_column: &str,
    aggregation: Aggregation,
) -> Result<PivotTable, TableError> {
    if index_columns.is_empty() {
        return Err(TableError::EmptyIndex);
    }
    let index_names: Vec<String> = index_columns.iter().map(|c| c.as_ref().to_string()).collect();

    let mut keys: BTreeSet<OrderedValues> = BTreeSet::new();
    let mut cells: BTreeMap<OrderedValues, BTreeMap<OrderedValues, Accumulator>> = BTreeMap::new();
    let mut dropped = 0usize;

    for row in rows {
        let index: Vec<Value> = index_names
            .iter()
            .map(|c| row.get(c).cloned().unwrap_or(Value::Null))
            .collect();
        let key = row.get(column_key).cloned().unwrap_or(Value::Null);
        if key.is_null() || index.iter().any(Value::is_null) {
            dropped += 1;
            continue;
        }

        let key = OrderedValues(vec![key]);
        keys.insert(key.clone());
        cells
            .entry(OrderedValues(index))
            .or_default()
            .entry(key)
            .or_default()
            .push(row.get(value_column).unwrap_or(&Value::Null));
    }

    let columns: Vec<String> = keys.iter().map(|k| k.0[0].label()).collect();
    let rows: Vec<PivotRow> = cells
        .into_iter()
        .map(|(index, by_key)| PivotRow {
            index: index.0,
            values: keys
                .iter()
                .map(|k| by_key.get(k).map_or(0.0, |acc| acc.finish(aggregation)))
                .collect(),
        })
        .collect();

    if dropped > 0 {
        tracing::debug!(dropped, "pivot skipped rows with null keys");
    }
    Ok(PivotTable {
        index_columns: index_names,
        columns,
        rows,
    })
}
