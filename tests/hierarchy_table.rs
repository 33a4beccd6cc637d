//! Integration tests for hierarchical tables
//!
//! Row order, subtotal flags, grand-total arithmetic and placeholder
//! rendering over one to three levels.

mod common;

use common::{row, sales_rows};
use salesdash::table::GRAND_TOTAL_LABEL;
use salesdash::{build_hierarchy_table, HierarchyRow, Value};

fn names(table: &[HierarchyRow]) -> Vec<&str> {
    table.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_single_level_first_seen_order() {
    let rows = vec![
        row(&[("cat", "A".into()), ("val", Value::Int(10))]),
        row(&[("cat", "A".into()), ("val", Value::Int(20))]),
        row(&[("cat", "B".into()), ("val", Value::Int(5))]),
    ];
    let table = build_hierarchy_table(&rows, &["cat"], &["val"]).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(names(&table), ["A", "B", GRAND_TOTAL_LABEL]);

    assert_eq!(table[0].raw("val"), Some(30.0));
    assert_eq!(table[0].depth, 0);
    assert!(!table[0].is_subtotal);
    assert!(!table[0].is_total);

    assert_eq!(table[1].raw("val"), Some(5.0));

    let total = &table[2];
    assert!(total.is_total);
    assert!(!total.is_subtotal);
    assert_eq!(total.depth, 0);
    assert_eq!(total.raw("val"), Some(35.0));
    assert_eq!(total.metric("val"), Some("35"));
}

#[test]
fn test_two_levels_depth_first() {
    let table = build_hierarchy_table(&sales_rows(), &["categorie", "sous_categorie"], &["ventes"]).unwrap();

    assert_eq!(
        names(&table),
        ["Boissons", "Eaux", "Jus", "Épicerie", "Pâtes", GRAND_TOTAL_LABEL]
    );
    let flags: Vec<(usize, bool)> = table.iter().map(|r| (r.depth, r.is_subtotal)).collect();
    assert_eq!(
        flags,
        [(0, true), (1, false), (1, false), (0, true), (1, false), (0, false)]
    );

    assert_eq!(table[0].raw("ventes"), Some(2350.25));
    assert_eq!(table[1].raw("ventes"), Some(1500.0));
    assert_eq!(table[0].metric("ventes"), Some("2 350"));
    assert_eq!(table[1].label, "  Eaux");
}

#[test]
fn test_three_levels_subtotal_flags() {
    let table = build_hierarchy_table(
        &sales_rows(),
        &["categorie", "sous_categorie", "produit"],
        &["ventes"],
    )
    .unwrap();

    assert_eq!(
        names(&table),
        [
            "Boissons", "Eaux", "Source", "Gazeuse", "Jus", "Orange",
            "Épicerie", "Pâtes", "Penne", GRAND_TOTAL_LABEL,
        ]
    );
    for r in table.iter().filter(|r| !r.is_total) {
        assert_eq!(r.is_subtotal, r.depth < 2, "row {}", r.label);
    }
    assert_eq!(table[3].label, "    Gazeuse");
}

#[test]
fn test_grand_total_equals_sum_of_top_level() {
    let metrics = ["ventes", "quantite"];
    for levels in [&["categorie"][..], &["categorie", "sous_categorie"][..], &["categorie", "sous_categorie", "produit"][..]] {
        let table = build_hierarchy_table(&sales_rows(), levels, &metrics).unwrap();
        let total = table.last().unwrap();
        assert!(total.is_total);
        for metric in metrics {
            let top: f64 = table
                .iter()
                .filter(|r| r.depth == 0 && !r.is_total)
                .filter_map(|r| r.raw(metric))
                .sum();
            assert_eq!(total.raw(metric), Some(top), "metric {} at depth {}", metric, levels.len());
        }
    }
}

#[test]
fn test_empty_input_only_grand_total() {
    let table = build_hierarchy_table(&[], &["categorie", "sous_categorie"], &["ventes", "quantite"]).unwrap();
    assert_eq!(table.len(), 1);
    let total = &table[0];
    assert_eq!(total.label, GRAND_TOTAL_LABEL);
    assert!(total.is_total);
    assert_eq!(total.metric("ventes"), Some("-"));
    assert_eq!(total.metric("quantite"), Some("-"));
}

#[test]
fn test_all_null_metric_renders_placeholder() {
    let table = build_hierarchy_table(&sales_rows(), &["categorie"], &["quantite"]).unwrap();
    // Épicerie only has a null quantity
    assert_eq!(table[1].name, "Épicerie");
    assert_eq!(table[1].metric("quantite"), Some("-"));
    assert_eq!(table[0].metric("quantite"), Some("67"));
    assert_eq!(table[2].metric("quantite"), Some("67"));
}

#[test]
fn test_large_amounts_are_grouped() {
    let table = build_hierarchy_table(&sales_rows(), &["categorie"], &["ventes"]).unwrap();
    assert_eq!(table[1].metric("ventes"), Some("1 000 000"));
    assert_eq!(table[2].metric("ventes"), Some("1 002 350"));
}

#[test]
fn test_unknown_metric_column_is_placeholder() {
    let table = build_hierarchy_table(&sales_rows(), &["categorie"], &["absent"]).unwrap();
    assert!(table.iter().all(|r| r.metric("absent") == Some("-")));
}

#[test]
fn test_serializes_for_display() {
    let rows = vec![row(&[("cat", "A".into()), ("val", Value::Int(1500))])];
    let table = build_hierarchy_table(&rows, &["cat"], &["val"]).unwrap();
    let json = serde_json::to_value(&table[0]).unwrap();
    assert_eq!(json["label"], "A");
    assert_eq!(json["cells"][0]["display"], "1 500");
    assert_eq!(json["is_subtotal"], false);
}
