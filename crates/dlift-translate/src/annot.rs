//! Mapping from source type annotations to D type expressions.

use dlift_ast::Expr;
use dlift_dlang::DType;

use crate::error::TranslateError;

/// Resolve a type-annotation expression to a D type.
///
/// Supported shapes, in priority order:
///
/// 1. `list[T]` / `List[T]`: a dynamic array of the recursively resolved
///    element type. Subscripts over any other base fail.
/// 2. A bare name: `int` maps to D's fixed-width `int` even though source
///    integers are arbitrary precision, so callers get that narrowing, not a
///    bigint. `float` maps to `double`, `bool` to `bool`, and any other name
///    passes through verbatim as a named type, unvalidated.
///
/// Anything else (attribute access, union syntax, generic aliases) fails
/// with [`TranslateError::UnsupportedAnnotation`]. Pure; no side effects.
pub fn annotation_to_type(annotation: &Expr) -> Result<DType, TranslateError> {
    match annotation {
        Expr::Subscript { value, index, span } => {
            if let Expr::Name(base) = value.as_ref() {
                if base.name == "list" || base.name == "List" {
                    return Ok(DType::DynArray(Box::new(annotation_to_type(index)?)));
                }
            }
            Err(TranslateError::UnsupportedAnnotation { span: *span })
        }
        Expr::Name(ident) => Ok(match ident.name.as_str() {
            "int" => DType::Int,
            "float" => DType::Double,
            "bool" => DType::Bool,
            other => DType::Named(other.to_string()),
        }),
        other => Err(TranslateError::UnsupportedAnnotation { span: other.span() }),
    }
}
