//! Logical query types (noun module)
//!
//! Represents an aggregate SELECT that the emitter turns into SQL text.

mod node;
mod expr;

pub use node::{SelectQuery, ProjectExpr, SortKey, SortDirection};
pub use expr::{Expr, Literal, BinaryOperator, is_identifier};
