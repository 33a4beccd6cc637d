//! Time dimensions used to bucket the date column
//!
//! Both enums are closed. Keys coming from the UI are resolved with
//! `resolve`, which never fails: an unknown key maps to the default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::plan::Expr;

/// Truncation applied to the date column in time-series queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeDimension {
    #[serde(rename = "jour")]
    Day,
    #[serde(rename = "semaine")]
    Week,
    #[default]
    #[serde(rename = "mois")]
    Month,
    #[serde(rename = "annee")]
    Year,
}

impl TimeDimension {
    /// UI key for this dimension
    pub fn key(&self) -> &'static str {
        match self {
            TimeDimension::Day => "jour",
            TimeDimension::Week => "semaine",
            TimeDimension::Month => "mois",
            TimeDimension::Year => "annee",
        }
    }

    /// Resolve a UI key, falling back to month
    pub fn resolve(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            tracing::debug!(time_dimension = key, "unknown time dimension, using month");
            TimeDimension::default()
        })
    }

    /// Truncation expression over `column`
    pub fn truncate(&self, column: &str) -> Expr {
        let col = Box::new(Expr::column(column));
        match self {
            TimeDimension::Day => Expr::Date(col),
            TimeDimension::Week => Expr::DateTrunc { unit: "week".into(), expr: col },
            TimeDimension::Month => Expr::DateTrunc { unit: "month".into(), expr: col },
            TimeDimension::Year => Expr::DateTrunc { unit: "year".into(), expr: col },
        }
    }
}

/// Bucketing used to label periods in comparison queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompareDimension {
    #[default]
    #[serde(rename = "annee")]
    Year,
    #[serde(rename = "mois")]
    Month,
    #[serde(rename = "trimestre")]
    Quarter,
}

impl CompareDimension {
    pub fn key(&self) -> &'static str {
        match self {
            CompareDimension::Year => "annee",
            CompareDimension::Month => "mois",
            CompareDimension::Quarter => "trimestre",
        }
    }

    /// Resolve a UI key, falling back to year
    pub fn resolve(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            tracing::debug!(compare_dimension = key, "unknown compare dimension, using year");
            CompareDimension::default()
        })
    }

    /// Period label expression over `column`
    pub fn label(&self, column: &str) -> Expr {
        let col = Box::new(Expr::column(column));
        match self {
            CompareDimension::Year => Expr::Extract { field: "YEAR".into(), expr: col },
            CompareDimension::Month => Expr::ToChar { expr: col, format: "YYYY-MM".into() },
            CompareDimension::Quarter => Expr::ToChar { expr: col, format: "YYYY-Q".into() },
        }
    }
}

/// Error when a dimension key is not recognised
#[derive(Debug, Clone)]
pub struct UnknownDimensionError {
    pub input: String,
}

impl fmt::Display for UnknownDimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown dimension key '{}'", self.input)
    }
}

impl std::error::Error for UnknownDimensionError {}

impl FromStr for TimeDimension {
    type Err = UnknownDimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jour" => Ok(TimeDimension::Day),
            "semaine" => Ok(TimeDimension::Week),
            "mois" => Ok(TimeDimension::Month),
            "annee" => Ok(TimeDimension::Year),
            _ => Err(UnknownDimensionError { input: s.to_string() }),
        }
    }
}

impl FromStr for CompareDimension {
    type Err = UnknownDimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annee" => Ok(CompareDimension::Year),
            "mois" => Ok(CompareDimension::Month),
            "trimestre" => Ok(CompareDimension::Quarter),
            _ => Err(UnknownDimensionError { input: s.to_string() }),
        }
    }
}
