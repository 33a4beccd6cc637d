//! SQL emitter (verb module)
//!
//! Transforms a SelectQuery into SQL text.

mod error;
mod sql;

pub use error::EmitError;
pub use sql::{emit_sql, emit_expr};
