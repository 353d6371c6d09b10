//! Target-side AST for the emitted D source.
//!
//! Nodes are a plain immutable tree; rendering is a separate `Display` pass
//! over that tree, so structural invariants (types are trees, argument order
//! is ownership order) hold independently of any text form.

pub mod ast;

pub use ast::{DExpr, DStmt, DType};
