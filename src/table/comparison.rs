//! Side-by-side comparison of two row sets

use serde::Serialize;
use std::collections::BTreeMap;
use super::format::format_optional;
use super::value::{OrderedValues, Row, Value};

/// Result of [`build_comparison_table`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub key_column: String,
    /// Output column names after the key, in order
    pub columns: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub key: Value,
    /// Aligned with [`ComparisonTable::columns`]
    pub values: Vec<Option<f64>>,
}

impl ComparisonTable {
    /// Value of `column` in the row keyed by `key` (compared by label)
    pub fn get(&self, key: &str, column: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| r.key.label() == key)
            .and_then(|r| r.values[col])
    }

    /// Rows rendered for display. Percentages keep one decimal.
    pub fn formatted_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                std::iter::once(row.key.label())
                    .chain(self.columns.iter().zip(&row.values).map(|(col, v)| {
                        match v {
                            Some(pct) if col.ends_with("_variance_pct") => format!("{:.1}%", pct),
                            other => format_optional(*other),
                        }
                    }))
                    .collect()
            })
            .collect()
    }
}

/// Join `left` and `right` on `key_column` and put each metric side by side.
///
/// Metric columns are the non-key columns of the first `left` row, sorted
/// by name. Keys missing from `right` are dropped; output follows `left`
/// order. With `show_variance`, each metric also gets `<col>_variance`
/// (`right - left`) and `<col>_variance_pct`, which is `None` when the
/// left value is zero or either side is null.
pub fn build_comparison_table(
    left: &[Row],
    right: &[Row],
    key_column: &str,
    left_label: &str,
    right_label: &str,
    show_variance: bool,
) -> ComparisonTable {
    let metrics: Vec<String> = left
        .first()
        .map(|row| row.keys().filter(|k| k.as_str() != key_column).cloned().collect())
        .unwrap_or_default();

    let mut columns = Vec::new();
    for metric in &metrics {
        columns.push(format!("{}_{}", metric, left_label));
        columns.push(format!("{}_{}", metric, right_label));
        if show_variance {
            columns.push(format!("{}_variance", metric));
            columns.push(format!("{}_variance_pct", metric));
        }
    }

    // first right row wins for a repeated key
    let mut by_key: BTreeMap<OrderedValues, &Row> = BTreeMap::new();
    for r in right {
        let key = r.get(key_column).cloned().unwrap_or(Value::Null);
        by_key.entry(OrderedValues(vec![key])).or_insert(r);
    }

    let mut rows = Vec::new();
    for l in left {
        let key = l.get(key_column).cloned().unwrap_or(Value::Null);
        let Some(&r) = by_key.get(&OrderedValues(vec![key.clone()])) else {
            continue;
        };

        let mut values = Vec::with_capacity(columns.len());
        for metric in &metrics {
            let a = l.get(metric).and_then(Value::as_f64);
            let b = r.get(metric).and_then(Value::as_f64);
            values.push(a);
            values.push(b);
            if show_variance {
                let variance = a.zip(b).map(|(a, b)| b - a);
                let pct = a
                    .zip(variance)
                    .filter(|(a, _)| *a != 0.0)
                    .map(|(a, v)| v / a * 100.0);
                values.push(variance);
                values.push(pct);
            }
        }
        rows.push(ComparisonRow { key, values });
    }

    tracing::debug!(left = left.len(), right = right.len(), joined = rows.len(), "built comparison table");
    ComparisonTable {
        key_column: key_column.to_string(),
        columns,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_formatted_pct() {
        let left = vec![row(&[("cat", "A".into()), ("ca", Value::Int(200))])];
        let right = vec![row(&[("cat", "A".into()), ("ca", Value::Int(250))])];
        let table = build_comparison_table(&left, &right, "cat", "2023", "2024", true);
        assert_eq!(table.formatted_rows(), vec![vec!["A", "200", "250", "50", "25.0%"]]);
    }

    #[test]
    fn test_join_keeps_left_order_and_first_right_match() {
        let left: Vec<Row> = (0..50)
            .rev()
            .map(|i| row(&[("cat", Value::Int(i)), ("ca", Value::Int(i * 10))]))
            .collect();
        let mut right: Vec<Row> = (0..50)
            .filter(|i| i % 2 == 0)
            .map(|i| row(&[("cat", Value::Float(i as f64)), ("ca", Value::Int(i * 20))]))
            .collect();
        right.push(row(&[("cat", Value::Int(48)), ("ca", Value::Int(-1))]));

        let table = build_comparison_table(&left, &right, "cat", "a", "b", false);
        assert_eq!(table.rows.len(), 25);
        assert_eq!(table.rows[0].key, Value::Int(48));
        assert_eq!(table.rows[0].values, [Some(480.0), Some(960.0)]);
        assert_eq!(table.rows[24].key, Value::Int(0));
    }

    #[test]
    fn test_null_side_has_no_variance() {
        let left = vec![row(&[("cat", "A".into()), ("ca", Value::Null)])];
        let right = vec![row(&[("cat", "A".into()), ("ca", Value::Int(5))])];
        let table = build_comparison_table(&left, &right, "cat", "n", "m", true);
        assert_eq!(table.get("A", "ca_variance"), None);
        assert_eq!(table.formatted_rows()[0][3], "-");
    }
}
