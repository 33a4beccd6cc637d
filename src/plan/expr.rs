//! Expression types for the logical query

use chrono::NaiveDate;
use crate::catalog::Aggregation;

/// Scalar expressions over the single fact table
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Unqualified column of the fact table
    Column(String),
    /// Named bind parameter, emitted as `:name`
    Param(String),
    Literal(Literal),
    /// Comparison (e.g. `a = b`, `a >= :p`)
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// Membership in a bound list: `expr = ANY(:param)`
    AnyOf {
        expr: Box<Expr>,
        param: String,
    },
    /// `expr BETWEEN low AND high`
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    /// Aggregate call, optionally restricted by a FILTER clause
    Aggregate {
        func: Aggregation,
        expr: Box<Expr>,
        filter: Option<Box<Expr>>,
    },
    /// `DATE(expr)`
    Date(Box<Expr>),
    /// `DATE_TRUNC('unit', expr)`
    DateTrunc {
        unit: String,
        expr: Box<Expr>,
    },
    /// `EXTRACT(field FROM expr)`
    Extract {
        field: String,
        expr: Box<Expr>,
    },
    /// `TO_CHAR(expr, 'format')`
    ToChar {
        expr: Box<Expr>,
        format: String,
    },
    /// Postgres cast: `expr::type_name`
    Cast {
        expr: Box<Expr>,
        type_name: String,
    },
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column(name.into())
    }

    pub fn param(name: impl Into<String>) -> Self {
        Expr::Param(name.into())
    }

    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Expr::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// `'YYYY-MM-DD'::timestamp`
    pub fn timestamp(date: NaiveDate) -> Self {
        Expr::Cast {
            expr: Box::new(Expr::Literal(Literal::Date(date))),
            type_name: "timestamp".to_string(),
        }
    }
}

/// Values written into the SQL text. Only ever built from validated
/// inputs; user-supplied filter values go through parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Rendered as `'YYYY-MM-DD'`
    Date(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,
    GtEq,
    LtEq,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Eq => "=",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::LtEq => "<=",
        }
    }
}

/// Check that `s` is a plain SQL identifier: `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("categorie_principale"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1col"));
        assert!(!is_identifier("a b"));
        assert!(!is_identifier("nom\"; --"));
        assert!(!is_identifier("catégorie"));
    }
}
