//! Failure taxonomy for a translation run.

use dlift_ast::Span;
use thiserror::Error;

/// Everything that can stop (or, in one case, locally redirect) a
/// translation.
///
/// `UnsupportedAnnotation` is recovered at exactly two call sites: the
/// annotated-assignment rule and the function-parameter rule, both of which
/// fall back to an inferred/dynamic type. Every other variant unwinds to the
/// top-level caller and the whole translation aborts with no partial output.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TranslateError {
    /// A type annotation whose shape the resolver does not recognize.
    #[error("unsupported type annotation at {span}")]
    UnsupportedAnnotation { span: Span },

    /// Multi-target assignment (`a = b = value`).
    #[error("assignment unpacking is not supported at {span}")]
    UnpackingNotSupported { span: Span },

    /// A source node kind with no translation rule.
    #[error("unsupported construct ({what}) at {span}")]
    UnsupportedConstruct { what: &'static str, span: Span },

    /// The external scope-resolution pass never reported a scope for this
    /// binding name node. A contract violation by the caller, not a source
    /// language limitation.
    #[error("no scope information for binding of `{name}` at {span}")]
    MissingScopeInfo { name: String, span: Span },
}
