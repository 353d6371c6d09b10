//! Source-side AST for the Python subset dlift translates.
//!
//! Parsing is an external collaborator's job; this crate only defines the
//! tree shape that collaborator produces, plus the contract types of the
//! scope-resolution pass that runs over the full tree before translation.
//! Every node is serde-serializable so a parser running out of process can
//! hand trees across the boundary as JSON.

pub mod ast;
pub mod scope;
pub mod span;

// Re-export commonly used types
pub use ast::{Arg, Constant, Expr, Ident, Module, NodeId, Stmt};
pub use scope::{ScopeId, ScopeResolution};
pub use span::Span;
