//! Catalog parser (verb module)
//!
//! Transforms YAML files into a validated Catalog.

use std::path::Path;
use crate::catalog::Catalog;
use crate::error::ParseError;

/// Parse a catalog from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Catalog, ParseError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_str(&contents)?;
    tracing::debug!(path = %path.display(), "catalog file parsed");
    Ok(catalog)
}

/// Parse a catalog from a YAML string
pub fn parse_str(yaml: &str) -> Result<Catalog, ParseError> {
    let catalog: Catalog = serde_yaml::from_str(yaml)?;
    catalog.validate()?;
    tracing::debug!(
        table = %catalog.table,
        indicators = catalog.indicators.len(),
        granularities = catalog.granularities.len(),
        "loaded catalog"
    );
    Ok(catalog)
}
