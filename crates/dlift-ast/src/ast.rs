//! AST node definitions for the translated source subset.
//!
//! The node-kind set is a closed enum rather than an open visitor surface:
//! every kind the translator supports gets an explicit rule, and every kind
//! it rejects is still representable so rejection is an explicit error path
//! instead of a silent fall-through.

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Unique identifier for a binding-introducing name node.
///
/// The external scope-resolution pass keys its results by this, so the id
/// must be stable between parsing and translation. Values are assigned by
/// the parser; this crate never generates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// A name occurrence carrying its node identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    pub node: NodeId,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, node: NodeId, span: Span) -> Self {
        Self {
            name: name.into(),
            node,
            span,
        }
    }
}

/// Literal constant values.
///
/// Source integers are arbitrary precision; narrowing them to `i64` here
/// (and to `int` on the target side) is a deliberate, lossy simplification.
/// `Float`, `Bool` and `None` are representable but have no translation
/// rule in this subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constant {
    Int(i64),
    Str(String),
    Float(f64),
    Bool(bool),
    None,
}

/// Expressions.
///
/// Type annotations are ordinary expressions in the source language, so the
/// shapes annotation resolution must reject (`Attribute`, `Call`, foreign
/// subscripts) live here alongside the value forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Name(Ident),
    Constant {
        value: Constant,
        span: Span,
    },
    List {
        elts: Vec<Expr>,
        span: Span,
    },
    Subscript {
        value: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
    Attribute {
        value: Box<Expr>,
        attr: String,
        span: Span,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        span: Span,
    },
}

impl Expr {
    /// The source location of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Name(ident) => ident.span,
            Expr::Constant { span, .. }
            | Expr::List { span, .. }
            | Expr::Subscript { span, .. }
            | Expr::Attribute { span, .. }
            | Expr::Call { span, .. } => *span,
        }
    }
}

/// A function parameter. The `node` identity is what the scope-resolution
/// pass binds the parameter's scope to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arg {
    pub name: String,
    pub node: NodeId,
    pub annotation: Option<Expr>,
    pub span: Span,
}

/// Statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// `a = value`, or `a = b = value` with multiple targets.
    Assign {
        targets: Vec<Expr>,
        value: Expr,
        span: Span,
    },
    /// `name: annotation = value`
    AnnAssign {
        target: Ident,
        annotation: Expr,
        value: Expr,
        span: Span,
    },
    /// `pass`
    Pass { span: Span },
    /// `def name(args): body`
    FunctionDef {
        name: String,
        args: Vec<Arg>,
        body: Vec<Stmt>,
        returns: Option<Expr>,
        span: Span,
    },
    /// `return value`: representable, not translatable in this subset.
    Return { value: Option<Expr>, span: Span },
    /// `while test: body`: representable, not translatable in this subset.
    While {
        test: Expr,
        body: Vec<Stmt>,
        span: Span,
    },
}

impl Stmt {
    /// The source location of this statement.
    pub fn span(&self) -> Span {
        match self {
            Stmt::Assign { span, .. }
            | Stmt::AnnAssign { span, .. }
            | Stmt::Pass { span }
            | Stmt::FunctionDef { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::While { span, .. } => *span,
        }
    }
}

/// A parsed compilation unit: the top-level statements of the function's
/// module wrapper, in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Module {
    pub body: Vec<Stmt>,
}

impl Module {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}
