//! Catalog loading errors

use std::fmt;
use std::path::PathBuf;

/// Why a catalog could not be loaded
#[derive(Debug)]
pub enum ParseError {
    /// The catalog file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Not YAML, or YAML that does not match the catalog layout
    Yaml(serde_yaml::Error),
    /// Well-formed, but would produce unsafe or ambiguous SQL
    Invalid(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io { path, source } => {
                write!(f, "Cannot read catalog {}: {}", path.display(), source)
            }
            ParseError::Yaml(err) => write!(f, "Malformed catalog: {}", err),
            ParseError::Invalid(msg) => write!(f, "Invalid catalog: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io { source, .. } => Some(source),
            ParseError::Yaml(err) => Some(err),
            ParseError::Invalid(_) => None,
        }
    }
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        ParseError::Yaml(err)
    }
}
