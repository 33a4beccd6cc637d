//! Query node types

use super::expr::Expr;

/// A single aggregate SELECT over one table.
///
/// Every dashboard query has this shape, so the plan is flat rather than
/// a tree of relations.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    /// SELECT list, in output order
    pub projections: Vec<ProjectExpr>,
    /// Table name (schema.table)
    pub from: String,
    /// WHERE predicates, joined with AND
    pub filters: Vec<Expr>,
    /// GROUP BY expressions
    pub group_by: Vec<Expr>,
    /// ORDER BY keys
    pub order_by: Vec<SortKey>,
}

impl SelectQuery {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            projections: Vec::new(),
            from: from.into(),
            filters: Vec::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
        }
    }

    pub fn project(mut self, expr: Expr, alias: Option<&str>) -> Self {
        self.projections.push(ProjectExpr {
            expr,
            alias: alias.map(str::to_string),
        });
        self
    }

    pub fn filter(mut self, predicate: Expr) -> Self {
        self.filters.push(predicate);
        self
    }

    pub fn filters(mut self, predicates: impl IntoIterator<Item = Expr>) -> Self {
        self.filters.extend(predicates);
        self
    }

    pub fn group_by(mut self, expr: Expr) -> Self {
        self.group_by.push(expr);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by.push(SortKey {
            column: column.into(),
            direction,
        });
        self
    }

    /// Output column names (alias, or column name for bare columns)
    pub fn output_names(&self) -> Vec<String> {
        self.projections
            .iter()
            .map(|p| match (&p.alias, &p.expr) {
                (Some(alias), _) => alias.clone(),
                (None, Expr::Column(name)) => name.clone(),
                (None, _) => String::new(),
            })
            .collect()
    }
}

/// A projected expression with its optional output alias
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectExpr {
    /// The expression to compute
    pub expr: Expr,
    /// Output column name
    pub alias: Option<String>,
}

/// A sort key with direction
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    /// Column name to sort by
    pub column: String,
    /// Sort direction
    pub direction: SortDirection,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Ascending,
    Descending,
}
