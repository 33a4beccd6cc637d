//! Builder output: SQL text plus bound parameters

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// A value bound to a named placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Bound as an array, used with `= ANY(:name)`
    List(Vec<String>),
    Date(NaiveDate),
}

/// A query ready for an executor.
///
/// `sql` holds `:name` placeholders; `params` maps each name to its value.
/// Parameters are kept in a sorted map so that identical inputs always
/// produce identical descriptors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDescriptor {
    pub sql: String,
    pub params: BTreeMap<String, ParamValue>,
    /// Output column names, in SELECT order
    pub columns: Vec<String>,
}

impl QueryDescriptor {
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    pub fn param_names(&self) -> Vec<&str> {
        self.params.keys().map(String::as_str).collect()
    }
}
