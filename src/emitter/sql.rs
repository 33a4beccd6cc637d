//! SQL emitter
//!
//! Transforms a SelectQuery into a Postgres-flavoured SQL string with named
//! `:param` placeholders.

use crate::catalog::Aggregation;
use crate::plan::{Expr, Literal, ProjectExpr, SelectQuery, SortDirection};
use super::error::EmitError;

/// Emit a multi-line SQL string from a SelectQuery.
///
/// One clause per line; empty WHERE / GROUP BY / ORDER BY clauses are omitted.
pub fn emit_sql(query: &SelectQuery) -> Result<String, EmitError> {
    if query.projections.is_empty() {
        return Err(EmitError::InvalidPlan("SELECT list is empty".to_string()));
    }
    if query.from.is_empty() {
        return Err(EmitError::InvalidPlan("FROM table is empty".to_string()));
    }

    let items: Vec<String> = query.projections
        .iter()
        .map(emit_projection)
        .collect();

    let mut sql = format!("SELECT {}\nFROM {}", items.join(", "), query.from);

    if !query.filters.is_empty() {
        let predicates: Vec<String> = query.filters
            .iter()
            .map(emit_expr)
            .collect();
        sql.push_str(&format!("\nWHERE {}", predicates.join(" AND ")));
    }

    if !query.group_by.is_empty() {
        let groups: Vec<String> = query.group_by
            .iter()
            .map(emit_expr)
            .collect();
        sql.push_str(&format!("\nGROUP BY {}", groups.join(", ")));
    }

    if !query.order_by.is_empty() {
        let keys: Vec<String> = query.order_by
            .iter()
            .map(|k| {
                let dir = match k.direction {
                    SortDirection::Ascending => "ASC",
                    SortDirection::Descending => "DESC",
                };
                format!("{} {}", k.column, dir)
            })
            .collect();
        sql.push_str(&format!("\nORDER BY {}", keys.join(", ")));
    }

    Ok(sql)
}

fn emit_projection(pe: &ProjectExpr) -> String {
    let expr_sql = emit_expr(&pe.expr);
    match &pe.alias {
        Some(alias) => format!("{} AS {}", expr_sql, quote_ident(alias)),
        None => expr_sql,
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// Emit a single expression
pub fn emit_expr(expr: &Expr) -> String {
    match expr {
        Expr::Column(name) => name.clone(),
        Expr::Param(name) => format!(":{}", name),
        Expr::Literal(lit) => emit_literal(lit),
        Expr::BinaryOp { left, op, right } => {
            let l = emit_expr(left);
            let r = emit_expr(right);
            format!("{} {} {}", l, op.as_str(), r)
        }
        Expr::AnyOf { expr, param } => format!("{} = ANY(:{})", emit_expr(expr), param),
        Expr::Between { expr, low, high } => format!(
            "{} BETWEEN {} AND {}",
            emit_expr(expr),
            emit_expr(low),
            emit_expr(high),
        ),
        Expr::Aggregate { func, expr, filter } => {
            let inner = emit_expr(expr);
            let call = match func {
                Aggregation::CountDistinct => format!("COUNT(DISTINCT {})", inner),
                other => format!("{}({})", other.sql_name(), inner),
            };
            match filter {
                Some(pred) => format!("{} FILTER (WHERE {})", call, emit_expr(pred)),
                None => call,
            }
        }
        Expr::Date(inner) => format!("DATE({})", emit_expr(inner)),
        Expr::DateTrunc { unit, expr } => format!(
            "DATE_TRUNC({}, {})",
            emit_string(unit),
            emit_expr(expr),
        ),
        Expr::Extract { field, expr } => format!("EXTRACT({} FROM {})", field, emit_expr(expr)),
        Expr::ToChar { expr, format } => format!(
            "TO_CHAR({}, {})",
            emit_expr(expr),
            emit_string(format),
        ),
        Expr::Cast { expr, type_name } => format!("{}::{}", emit_expr(expr), type_name),
    }
}

fn emit_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn emit_literal(lit: &Literal) -> String {
    match lit {
        Literal::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::BinaryOperator;
    use chrono::NaiveDate;

    fn sum_of(column: &str) -> Expr {
        Expr::Aggregate {
            func: Aggregation::Sum,
            expr: Box::new(Expr::column(column)),
            filter: None,
        }
    }

    // -- unit: select ---------------------------------------------------------

    #[test]
    fn test_sql_minimal_select() {
        let query = SelectQuery::new("sales.ventes").project(sum_of("montant_vente"), Some("valeur"));
        let sql = emit_sql(&query).unwrap();
        assert_eq!(sql, "SELECT SUM(montant_vente) AS \"valeur\"\nFROM sales.ventes");
    }

    #[test]
    fn test_sql_all_clauses() {
        let query = SelectQuery::new("sales.ventes")
            .project(sum_of("quantite"), Some("valeur"))
            .project(Expr::column("categorie_principale"), None)
            .filter(Expr::AnyOf {
                expr: Box::new(Expr::column("region_id")),
                param: "regions".into(),
            })
            .filter(Expr::binary(Expr::column("date_vente"), BinaryOperator::GtEq, Expr::param("date_debut")))
            .group_by(Expr::column("categorie_principale"))
            .order_by("categorie_principale", SortDirection::Ascending);
        let sql = emit_sql(&query).unwrap();
        assert_eq!(
            sql,
            "SELECT SUM(quantite) AS \"valeur\", categorie_principale\n\
             FROM sales.ventes\n\
             WHERE region_id = ANY(:regions) AND date_vente >= :date_debut\n\
             GROUP BY categorie_principale\n\
             ORDER BY categorie_principale ASC"
        );
    }

    #[test]
    fn test_sql_descending_sort() {
        let query = SelectQuery::new("t")
            .project(Expr::column("a"), None)
            .order_by("a", SortDirection::Descending);
        assert!(emit_sql(&query).unwrap().ends_with("ORDER BY a DESC"));
    }

    #[test]
    fn test_sql_empty_select_is_invalid() {
        let query = SelectQuery::new("sales.ventes");
        assert!(matches!(emit_sql(&query), Err(EmitError::InvalidPlan(_))));
    }

    #[test]
    fn test_sql_alias_is_quoted() {
        let query = SelectQuery::new("t").project(Expr::column("a"), Some("we\"ird"));
        assert!(emit_sql(&query).unwrap().contains("a AS \"we\"\"ird\""));
    }

    // -- unit: expressions ----------------------------------------------------

    #[test]
    fn test_sql_count_distinct() {
        let expr = Expr::Aggregate {
            func: Aggregation::CountDistinct,
            expr: Box::new(Expr::column("transaction_id")),
            filter: None,
        };
        assert_eq!(emit_expr(&expr), "COUNT(DISTINCT transaction_id)");
    }

    #[test]
    fn test_sql_filtered_aggregate() {
        let expr = Expr::Aggregate {
            func: Aggregation::Sum,
            expr: Box::new(Expr::column("montant_vente")),
            filter: Some(Box::new(Expr::binary(
                Expr::DateTrunc { unit: "month".into(), expr: Box::new(Expr::column("date_vente")) },
                BinaryOperator::Eq,
                Expr::timestamp(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            ))),
        };
        assert_eq!(
            emit_expr(&expr),
            "SUM(montant_vente) FILTER (WHERE DATE_TRUNC('month', date_vente) = '2024-03-01'::timestamp)"
        );
    }

    #[test]
    fn test_sql_between() {
        let expr = Expr::Between {
            expr: Box::new(Expr::column("date_vente")),
            low: Box::new(Expr::param("date_debut")),
            high: Box::new(Expr::param("date_fin")),
        };
        assert_eq!(emit_expr(&expr), "date_vente BETWEEN :date_debut AND :date_fin");
    }

    #[test]
    fn test_sql_date_literal() {
        let expr = Expr::Literal(Literal::Date(NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()));
        assert_eq!(emit_expr(&expr), "'2023-12-01'");
    }

    #[test]
    fn test_sql_to_char_quotes_format() {
        let expr = Expr::ToChar {
            expr: Box::new(Expr::column("date_vente")),
            format: "YYYY-\"S\"IW".into(),
        };
        assert_eq!(emit_expr(&expr), "TO_CHAR(date_vente, 'YYYY-\"S\"IW')");
    }
}
