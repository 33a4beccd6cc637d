//! Shared test utilities for integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::fmt;

use salesdash::{parser, Catalog, QueryDescriptor, Row, RowExecutor, Value};

/// Load a test fixture from the tests/test_data directory
pub fn load_fixture(name: &str) -> Catalog {
    let path = format!("tests/test_data/{}", name);
    parser::parse_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// Build a row from column/value pairs
pub fn row(pairs: &[(&str, Value)]) -> Row {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

/// Flat sales rows: two categories, three sub-categories, two products
pub fn sales_rows() -> Vec<Row> {
    vec![
        row(&[
            ("categorie", "Boissons".into()),
            ("sous_categorie", "Eaux".into()),
            ("produit", "Source".into()),
            ("ventes", Value::Int(1200)),
            ("quantite", Value::Int(40)),
        ]),
        row(&[
            ("categorie", "Boissons".into()),
            ("sous_categorie", "Jus".into()),
            ("produit", "Orange".into()),
            ("ventes", Value::Float(850.25)),
            ("quantite", Value::Int(17)),
        ]),
        row(&[
            ("categorie", "Épicerie".into()),
            ("sous_categorie", "Pâtes".into()),
            ("produit", "Penne".into()),
            ("ventes", Value::Int(1_000_000)),
            ("quantite", Value::Null),
        ]),
        row(&[
            ("categorie", "Boissons".into()),
            ("sous_categorie", "Eaux".into()),
            ("produit", "Gazeuse".into()),
            ("ventes", Value::Int(300)),
            ("quantite", Value::Int(10)),
        ]),
    ]
}

/// Time-series result rows as a database would return them
pub fn time_series_rows() -> Vec<Row> {
    vec![
        row(&[("periode", "2024-01".into()), ("categorie_principale", "Boissons".into()), ("valeur", Value::Int(100))]),
        row(&[("periode", "2024-02".into()), ("categorie_principale", "Boissons".into()), ("valeur", Value::Int(150))]),
        row(&[("periode", "2024-01".into()), ("categorie_principale", "Épicerie".into()), ("valeur", Value::Int(80))]),
    ]
}

#[derive(Debug)]
pub struct ExecError(pub String);

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ExecError {}

/// In-memory executor returning canned rows and recording every descriptor
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    rows: Vec<Row>,
    fail_with: Option<String>,
    pub seen: RefCell<Vec<QueryDescriptor>>,
}

impl RecordingExecutor {
    pub fn returning(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn last(&self) -> QueryDescriptor {
        self.seen.borrow().last().cloned().expect("no query executed")
    }
}

impl RowExecutor for RecordingExecutor {
    type Error = ExecError;

    fn execute(&self, descriptor: &QueryDescriptor) -> Result<Vec<Row>, ExecError> {
        self.seen.borrow_mut().push(descriptor.clone());
        match &self.fail_with {
            Some(message) => Err(ExecError(message.clone())),
            None => Ok(self.rows.clone()),
        }
    }
}
