//! Hierarchical tables with subtotals and a grand total

use serde::Serialize;
use std::collections::BTreeMap;
use super::error::TableError;
use super::format::format_optional;
use super::value::{OrderedValues, Row, Value};

/// Label of the final row
pub const GRAND_TOTAL_LABEL: &str = "TOTAL GÉNÉRAL";

/// Deepest supported hierarchy
pub const MAX_HIERARCHY_DEPTH: usize = 3;

const INDENT: &str = "  ";

/// One display row of a hierarchical table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyRow {
    /// Label indented by two spaces per depth level
    pub label: String,
    /// Unindented label
    pub name: String,
    pub depth: usize,
    pub is_total: bool,
    pub is_subtotal: bool,
    /// One cell per metric column, in the requested order
    pub cells: Vec<MetricCell>,
}

/// A summed metric and its rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCell {
    pub column: String,
    /// `None` when no row contributed a value
    pub raw: Option<f64>,
    pub display: String,
}

impl HierarchyRow {
    fn new(name: String, depth: usize, is_total: bool, is_subtotal: bool, cells: Vec<MetricCell>) -> Self {
        Self {
            label: format!("{}{}", INDENT.repeat(depth), name),
            name,
            depth,
            is_total,
            is_subtotal,
            cells,
        }
    }

    /// Formatted value of a metric column
    pub fn metric(&self, column: &str) -> Option<&str> {
        self.cell(column).map(|c| c.display.as_str())
    }

    /// Summed value of a metric column
    pub fn raw(&self, column: &str) -> Option<f64> {
        self.cell(column).and_then(|c| c.raw)
    }

    fn cell(&self, column: &str) -> Option<&MetricCell> {
        self.cells.iter().find(|c| c.column == column)
    }
}

/// Build a hierarchical table from flat rows.
///
/// Emits, depth first, one row per distinct value of each hierarchy
/// column within its parent, in first-seen order, each carrying the sums
/// of its partition. A level is a subtotal iff a deeper level exists.
/// Ends with a single grand-total row over all input rows.
pub fn build_hierarchy_table<S: AsRef<str>, M: AsRef<str>>(
    rows: &[Row],
    hierarchy_columns: &[S],
    metric_columns: &[M],
) -> Result<Vec<HierarchyRow>, TableError> {
    let depth = hierarchy_columns.len();
    if depth == 0 || depth > MAX_HIERARCHY_DEPTH {
        return Err(TableError::HierarchyDepth(depth));
    }

    let levels: Vec<&str> = hierarchy_columns.iter().map(AsRef::as_ref).collect();
    let metrics: Vec<&str> = metric_columns.iter().map(AsRef::as_ref).collect();
    let all: Vec<&Row> = rows.iter().collect();

    let mut out = Vec::new();
    emit_level(&all, 0, &levels, &metrics, &mut out);
    out.push(HierarchyRow::new(
        GRAND_TOTAL_LABEL.to_string(),
        0,
        true,
        false,
        sum_metrics(&all, &metrics),
    ));

    tracing::debug!(input_rows = rows.len(), output_rows = out.len(), depth, "built hierarchy table");
    Ok(out)
}

fn emit_level(rows: &[&Row], level: usize, levels: &[&str], metrics: &[&str], out: &mut Vec<HierarchyRow>) {
    let has_children = level + 1 < levels.len();
    for (value, group) in partition(rows, levels[level]) {
        out.push(HierarchyRow::new(
            value.label(),
            level,
            false,
            has_children,
            sum_metrics(&group, metrics),
        ));
        if has_children {
            emit_level(&group, level + 1, levels, metrics, out);
        }
    }
}

/// Split rows by the value of `column`, groups in first-seen order
fn partition<'a>(rows: &[&'a Row], column: &str) -> Vec<(Value, Vec<&'a Row>)> {
    let mut groups: Vec<(Value, Vec<&'a Row>)> = Vec::new();
    let mut index: BTreeMap<OrderedValues, usize> = BTreeMap::new();
    for &row in rows {
        let value = row.get(column).cloned().unwrap_or(Value::Null);
        let slot = *index.entry(OrderedValues(vec![value.clone()])).or_insert_with(|| {
            groups.push((value, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row);
    }
    groups
}

fn sum_metrics(rows: &[&Row], metrics: &[&str]) -> Vec<MetricCell> {
    metrics
        .iter()
        .map(|&column| {
            let raw = rows
                .iter()
                .filter_map(|row| row.get(column).and_then(Value::as_f64))
                .fold(None, |acc: Option<f64>, v| Some(acc.unwrap_or(0.0) + v));
            MetricCell {
                column: column.to_string(),
                raw,
                display: format_optional(raw),
            }
        })
        .collect()
}
