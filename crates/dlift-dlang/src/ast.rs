//! D declaration, statement and expression nodes, each rendering itself
//! to source text through `Display`.

use std::fmt;

/// A D type expression.
///
/// Types form a tree by ownership: `DynArray` owns exactly one inner type,
/// so no cyclic type graphs are representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DType {
    /// Fixed-width 32-bit integer
    Int,
    /// Double-precision floating point
    Double,
    /// Boolean
    Bool,
    /// Infer-on-declaration marker
    Auto,
    /// A named or aliased type, passed through verbatim
    Named(String),
    /// Dynamic array of the inner type, `T[]`
    DynArray(Box<DType>),
}

impl DType {
    /// The tagged-union fallback type (`std.variant.Variant`), used whenever
    /// a source value's type cannot be statically determined.
    pub fn variant() -> DType {
        DType::Named("Variant".to_string())
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::Int => f.write_str("int"),
            DType::Double => f.write_str("double"),
            DType::Bool => f.write_str("bool"),
            DType::Auto => f.write_str("auto"),
            DType::Named(name) => f.write_str(name),
            DType::DynArray(inner) => write!(f, "{}[]", inner),
        }
    }
}

/// A D expression.
#[derive(Debug, Clone, PartialEq)]
pub enum DExpr {
    /// Integer literal, rendered in decimal
    Int(i64),
    /// String literal, rendered double-quoted with escaping
    Str(String),
    /// Array literal, `[a, b]`
    Array(Vec<DExpr>),
    /// Variable reference
    Var(String),
    /// Assignment expression, `lvalue = rvalue`
    Assign {
        lvalue: Box<DExpr>,
        rvalue: Box<DExpr>,
    },
    /// Call expression; argument order is evaluation and binding order
    Call {
        callee: Box<DExpr>,
        args: Vec<DExpr>,
    },
    /// Cast expression, `cast(T)expr`
    Cast { ty: DType, expr: Box<DExpr> },
}

impl fmt::Display for DExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DExpr::Int(value) => write!(f, "{}", value),
            DExpr::Str(value) => write_str_literal(f, value),
            DExpr::Array(elts) => {
                f.write_str("[")?;
                write_comma_separated(f, elts)?;
                f.write_str("]")
            }
            DExpr::Var(name) => f.write_str(name),
            DExpr::Assign { lvalue, rvalue } => write!(f, "{} = {}", lvalue, rvalue),
            DExpr::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                write_comma_separated(f, args)?;
                f.write_str(")")
            }
            DExpr::Cast { ty, expr } => write!(f, "cast({}){}", ty, expr),
        }
    }
}

/// A D statement or declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DStmt {
    /// `[storage] type name [= init];`
    VarDecl {
        storage_classes: Vec<String>,
        ty: DType,
        name: String,
        init: Option<DExpr>,
    },
    /// Expression statement, value discarded
    Expr(DExpr),
    /// Function declaration. An empty body renders as a forward
    /// declaration (`auto f(...);`).
    Function {
        name: String,
        params: Vec<(DType, String)>,
        body: Vec<DStmt>,
    },
    /// `;`
    Empty,
    /// Statements concatenated in order
    List(Vec<DStmt>),
}

impl DStmt {
    /// Convenience constructor for an unqualified declaration.
    pub fn var_decl(ty: DType, name: impl Into<String>, init: Option<DExpr>) -> DStmt {
        DStmt::VarDecl {
            storage_classes: Vec::new(),
            ty,
            name: name.into(),
            init,
        }
    }
}

impl fmt::Display for DStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DStmt::VarDecl {
                storage_classes,
                ty,
                name,
                init,
            } => {
                for storage in storage_classes {
                    write!(f, "{} ", storage)?;
                }
                write!(f, "{} {}", ty, name)?;
                if let Some(init) = init {
                    write!(f, " = {}", init)?;
                }
                f.write_str(";")
            }
            DStmt::Expr(expr) => write!(f, "{};", expr),
            DStmt::Function { name, params, body } => {
                write!(f, "auto {}(", name)?;
                for (i, (ty, param)) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} {}", ty, param)?;
                }
                if body.is_empty() {
                    return f.write_str(");");
                }
                f.write_str(") {")?;
                for stmt in body {
                    write!(f, "{}", stmt)?;
                }
                f.write_str("}")
            }
            DStmt::Empty => f.write_str(";"),
            DStmt::List(stmts) => {
                for stmt in stmts {
                    write!(f, "{}", stmt)?;
                }
                Ok(())
            }
        }
    }
}

fn write_comma_separated(f: &mut fmt::Formatter<'_>, exprs: &[DExpr]) -> fmt::Result {
    for (i, expr) in exprs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", expr)?;
    }
    Ok(())
}

/// Render a double-quoted D string literal, escaping quotes, backslashes
/// and control characters so embedded text cannot break out of the literal.
fn write_str_literal(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in value.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            '\0' => f.write_str("\\0")?,
            c if c.is_control() => write!(f, "\\x{:02x}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}
