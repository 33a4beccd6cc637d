//! Indicator types - aggregations offered to the dashboard

use serde::{Deserialize, Serialize};
use super::types::{Aggregation, QueryShape};
use crate::plan::Expr;

/// An indicator - one aggregation over one fact column
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Indicator {
    /// Stable key used by the UI (e.g. `ca_total`)
    pub name: String,
    pub label: Option<String>,
    /// Human-readable description for UIs
    pub description: Option<String>,
    #[serde(default)]
    pub aggregation: Aggregation,
    /// Fact column the aggregation reads
    pub column: String,
    /// Query shapes this indicator is offered in. Defaults to all of them.
    #[serde(default = "QueryShape::all")]
    pub shapes: Vec<QueryShape>,
}

impl Indicator {
    pub fn new(name: impl Into<String>, aggregation: Aggregation, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            description: None,
            aggregation,
            column: column.into(),
            shapes: QueryShape::all(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_shapes(mut self, shapes: Vec<QueryShape>) -> Self {
        self.shapes = shapes;
        self
    }

    /// Check if this indicator is offered for a query shape
    pub fn supports(&self, shape: QueryShape) -> bool {
        self.shapes.contains(&shape)
    }

    /// Display label, falling back to the key
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// The aggregate expression, e.g. `SUM(montant_vente)`
    pub fn aggregate_expr(&self) -> Expr {
        Expr::Aggregate {
            func: self.aggregation,
            expr: Box::new(Expr::column(&self.column)),
            filter: None,
        }
    }

    /// The aggregate expression restricted to rows matching `filter`
    pub fn filtered_aggregate_expr(&self, filter: Expr) -> Expr {
        Expr::Aggregate {
            func: self.aggregation,
            expr: Box::new(Expr::column(&self.column)),
            filter: Some(Box::new(filter)),
        }
    }
}
