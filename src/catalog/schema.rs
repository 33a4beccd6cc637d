//! Root catalog definition

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;
use super::granularity::Granularity;
use super::indicator::Indicator;
use super::types::{Aggregation, QueryShape};
use crate::error::ParseError;
use crate::plan::is_identifier;

/// Key of the indicator used when a requested one cannot be served
pub const DEFAULT_INDICATOR: &str = "_default";

/// The catalog: which fact table to read and what the UI may ask for.
///
/// Sections omitted from a YAML catalog fall back to the built-in
/// sales registry, so a catalog file only needs to list what differs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Catalog {
    /// Fully qualified fact table (e.g. `sales.ventes`)
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default)]
    pub columns: FactColumns,
    #[serde(default = "builtin_indicators")]
    pub indicators: Vec<Indicator>,
    #[serde(default = "builtin_granularities")]
    pub granularities: Vec<Granularity>,
}

/// Physical column names of the fact table
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FactColumns {
    /// Sale date, used by date filters and time buckets
    pub date: String,
    /// Primary amount, aggregated by the default indicator
    pub amount: String,
    pub region: String,
    pub category: String,
}

impl Default for FactColumns {
    fn default() -> Self {
        Self {
            date: "date_vente".to_string(),
            amount: "montant_vente".to_string(),
            region: "region_id".to_string(),
            category: "categorie_principale".to_string(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            table: default_table(),
            columns: FactColumns::default(),
            indicators: builtin_indicators(),
            granularities: builtin_granularities(),
        }
    }
}

fn default_table() -> String {
    "sales.ventes".to_string()
}

fn builtin_indicators() -> Vec<Indicator> {
    use QueryShape::*;
    vec![
        Indicator::new("ca_total", Aggregation::Sum, "montant_vente")
            .with_label("Chiffre d'affaires"),
        Indicator::new("quantite_vendue", Aggregation::Sum, "quantite")
            .with_label("Quantité vendue"),
        Indicator::new("nombre_transactions", Aggregation::CountDistinct, "transaction_id")
            .with_label("Nombre de transactions")
            .with_shapes(vec![TimeSeries, Hierarchy]),
        Indicator::new("panier_moyen", Aggregation::Avg, "montant_vente")
            .with_label("Panier moyen")
            .with_shapes(vec![TimeSeries]),
    ]
}

fn builtin_granularities() -> Vec<Granularity> {
    vec![
        Granularity::new("entreprise", Vec::<String>::new()).with_label("Entreprise"),
        Granularity::new("categorie", ["categorie_principale"]).with_label("Catégorie"),
        Granularity::new("sous_categorie", ["categorie_principale", "sous_categorie"])
            .with_label("Sous-catégorie"),
        Granularity::new(
            "produit",
            ["categorie_principale", "sous_categorie", "produit_id", "nom_produit"],
        )
        .with_label("Produit"),
    ]
}

impl Catalog {
    /// Load a catalog from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        crate::parser::parse_file(path)
    }

    /// Get an indicator by key
    pub fn get_indicator(&self, name: &str) -> Option<&Indicator> {
        self.indicators.iter().find(|i| i.name == name)
    }

    /// Get a granularity by key
    pub fn get_granularity(&self, name: &str) -> Option<&Granularity> {
        self.granularities.iter().find(|g| g.name == name)
    }

    /// The fallback indicator: sum of the primary amount column
    pub fn default_indicator(&self) -> Indicator {
        Indicator::new(DEFAULT_INDICATOR, Aggregation::Sum, &self.columns.amount)
    }

    /// Resolve an indicator for a query shape.
    ///
    /// Unknown keys and indicators not offered for `shape` resolve to
    /// `default_indicator`.
    pub fn resolve_indicator(&self, name: &str, shape: QueryShape) -> Cow<'_, Indicator> {
        match self.get_indicator(name) {
            Some(indicator) if indicator.supports(shape) => Cow::Borrowed(indicator),
            Some(_) => {
                tracing::debug!(indicator = name, %shape, "indicator not offered for shape, using default aggregation");
                Cow::Owned(self.default_indicator())
            }
            None => {
                tracing::debug!(indicator = name, "unknown indicator, using default aggregation");
                Cow::Owned(self.default_indicator())
            }
        }
    }

    /// Grouping columns of a granularity. Unknown keys group by nothing.
    pub fn granularity_columns(&self, name: &str) -> &[String] {
        match self.get_granularity(name) {
            Some(granularity) => &granularity.columns,
            None => {
                tracing::debug!(granularity = name, "unknown granularity, no grouping columns");
                &[]
            }
        }
    }

    /// Check the catalog can be compiled into SQL
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.table.is_empty() || !self.table.split('.').all(is_identifier) {
            return Err(ParseError::Invalid(format!("table '{}' is not a qualified identifier", self.table)));
        }

        let columns = [
            &self.columns.date,
            &self.columns.amount,
            &self.columns.region,
            &self.columns.category,
        ];
        for column in columns {
            check_identifier(column)?;
        }

        let mut seen = HashSet::new();
        for indicator in &self.indicators {
            if !seen.insert(indicator.name.as_str()) {
                return Err(ParseError::Invalid(format!("duplicate indicator '{}'", indicator.name)));
            }
            check_identifier(&indicator.column)?;
        }

        let mut seen = HashSet::new();
        for granularity in &self.granularities {
            if !seen.insert(granularity.name.as_str()) {
                return Err(ParseError::Invalid(format!("duplicate granularity '{}'", granularity.name)));
            }
            for column in &granularity.columns {
                check_identifier(column)?;
            }
        }

        Ok(())
    }
}

fn check_identifier(column: &str) -> Result<(), ParseError> {
    if is_identifier(column) {
        Ok(())
    } else {
        Err(ParseError::Invalid(format!("column '{}' is not an identifier", column)))
    }
}
