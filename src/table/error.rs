use std::fmt;

/// Errors that can occur while shaping result rows
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// Hierarchy tables take one to three levels
    HierarchyDepth(usize),
    /// Pivots need at least one index column
    EmptyIndex,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::HierarchyDepth(n) => {
                write!(f, "Hierarchy tables support 1 to 3 levels, got {}", n)
            }
            TableError::EmptyIndex => write!(f, "Pivot requires at least one index column"),
        }
    }
}

impl std::error::Error for TableError {}
