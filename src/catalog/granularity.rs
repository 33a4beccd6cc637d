//! Granularity levels - ordered grouping columns

use serde::{Deserialize, Serialize};

/// A granularity level and the grouping columns it adds, coarsest first
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Granularity {
    pub name: String,
    pub label: Option<String>,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl Granularity {
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            label: None,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Check if `other` starts with every column of this level
    pub fn is_prefix_of(&self, other: &Granularity) -> bool {
        other.columns.len() >= self.columns.len()
            && self.columns.iter().zip(&other.columns).all(|(a, b)| a == b)
    }
}
