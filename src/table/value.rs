//! Result row values

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// One result row: column name → value
pub type Row = BTreeMap<String, Value>;

/// A cell value as returned by an executor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Text(String),
}

impl Value {
    /// Numeric view of the value. Null, NaN, booleans and non-numeric text
    /// have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) if !f.is_nan() => Some(*f),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|f| !f.is_nan()),
            _ => None,
        }
    }

    /// Null or NaN
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Display text used for row labels and pivot headers
    pub fn label(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Total order used for sorting and grouping.
    ///
    /// Nulls first, then booleans, numbers (integers and floats compared
    /// numerically), dates, and text.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (a, b) if a.rank() == 2 && b.rank() == 2 => {
                let (x, y) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    /// Check if two values land in the same group
    pub fn same_group(&self, other: &Value) -> bool {
        self.sort_cmp(other) == Ordering::Equal
    }

    fn rank(&self) -> u8 {
        match self {
            v if v.is_null() => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Date(_) => 3,
            _ => 4,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Values compared with [`Value::sort_cmp`], usable as a map key
#[derive(Debug, Clone)]
pub(crate) struct OrderedValues(pub Vec<Value>);

impl PartialEq for OrderedValues {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderedValues {}

impl PartialOrd for OrderedValues {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedValues {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.0.iter().zip(&other.0) {
            match a.sort_cmp(b) {
                Ordering::Equal => continue,
                non_eq => return non_eq,
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_f64() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Text(" 12.5 ".into()).as_f64(), Some(12.5));
        assert_eq!(Value::Text("abc".into()).as_f64(), None);
        assert_eq!(Value::Float(f64::NAN).as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
        assert_eq!(Value::Bool(true).as_f64(), None);
    }

    #[test]
    fn test_sort_cmp_across_types() {
        let mut values = vec![
            Value::Text("b".into()),
            Value::Int(10),
            Value::Null,
            Value::Float(2.5),
            Value::Text("a".into()),
        ];
        values.sort_by(|a, b| a.sort_cmp(b));
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Float(2.5),
                Value::Int(10),
                Value::Text("a".into()),
                Value::Text("b".into()),
            ]
        );
    }

    #[test]
    fn test_same_group() {
        assert!(Value::Int(1).same_group(&Value::Float(1.0)));
        assert!(Value::Null.same_group(&Value::Float(f64::NAN)));
        assert!(!Value::Int(1).same_group(&Value::Text("1".into())));
        assert!(!Value::Float(f64::NAN).same_group(&Value::Int(0)));
    }

    #[test]
    fn test_label() {
        assert_eq!(Value::Null.label(), "");
        assert_eq!(Value::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()).label(), "2024-01-05");
        assert_eq!(Value::from("Boissons").label(), "Boissons");
    }

    #[test]
    fn test_deserialize_untagged() {
        let row: Row = serde_json::from_str(
            r#"{"cat": "A", "val": 10, "ratio": 0.5, "jour": "2024-02-01", "vide": null}"#,
        )
        .unwrap();
        assert_eq!(row["cat"], Value::Text("A".into()));
        assert_eq!(row["val"], Value::Int(10));
        assert_eq!(row["ratio"], Value::Float(0.5));
        assert_eq!(row["jour"], Value::Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
        assert_eq!(row["vide"], Value::Null);
    }
}
