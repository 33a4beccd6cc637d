//! Integration tests for side-by-side period comparison

mod common;

use common::row;
use salesdash::{build_comparison_table, Row, Value};

fn year(values: &[(&str, i64)]) -> Vec<Row> {
    values
        .iter()
        .map(|(cat, v)| row(&[("categorie", (*cat).into()), ("ventes", Value::Int(*v))]))
        .collect()
}

#[test]
fn test_columns_and_variance() {
    let left = year(&[("Boissons", 1000), ("Épicerie", 400)]);
    let right = year(&[("Épicerie", 300), ("Boissons", 1250)]);
    let table = build_comparison_table(&left, &right, "categorie", "2023", "2024", true);

    assert_eq!(
        table.columns,
        ["ventes_2023", "ventes_2024", "ventes_variance", "ventes_variance_pct"]
    );
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.get("Boissons", "ventes_variance"), Some(250.0));
    assert_eq!(table.get("Boissons", "ventes_variance_pct"), Some(25.0));
    assert_eq!(table.get("Épicerie", "ventes_variance"), Some(-100.0));
    assert_eq!(table.get("Épicerie", "ventes_variance_pct"), Some(-25.0));

    // left order is kept
    assert_eq!(table.rows[0].key, Value::from("Boissons"));
}

#[test]
fn test_without_variance() {
    let left = year(&[("Boissons", 1000)]);
    let right = year(&[("Boissons", 1250)]);
    let table = build_comparison_table(&left, &right, "categorie", "n-1", "n", false);
    assert_eq!(table.columns, ["ventes_n-1", "ventes_n"]);
    assert_eq!(table.formatted_rows(), vec![vec!["Boissons", "1 000", "1 250"]]);
}

#[test]
fn test_zero_base_has_no_percentage() {
    let left = year(&[("Frais", 0)]);
    let right = year(&[("Frais", 90)]);
    let table = build_comparison_table(&left, &right, "categorie", "a", "b", true);
    assert_eq!(table.get("Frais", "ventes_variance"), Some(90.0));
    assert_eq!(table.get("Frais", "ventes_variance_pct"), None);
    assert_eq!(table.formatted_rows()[0][4], "-");
}

#[test]
fn test_unmatched_keys_are_dropped() {
    let left = year(&[("Boissons", 10), ("Frais", 20)]);
    let right = year(&[("Boissons", 30), ("Hygiène", 40)]);
    let table = build_comparison_table(&left, &right, "categorie", "a", "b", true);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.get("Frais", "ventes_a"), None);
}

#[test]
fn test_empty_left() {
    let table = build_comparison_table(&[], &year(&[("Boissons", 1)]), "categorie", "a", "b", true);
    assert!(table.columns.is_empty());
    assert!(table.rows.is_empty());
}
