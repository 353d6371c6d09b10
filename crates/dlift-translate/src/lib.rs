//! Translation from the dynamically-typed source AST to the D AST.
//!
//! The core problem is bridging two type disciplines: the source has no
//! static types and freely rebinds names; D wants a concrete type (or an
//! explicit `auto`) on every declaration and distinguishes a name's first
//! binding from every later rebinding. The translator tracks per-scope
//! binding history to make that distinction, maps a best-effort subset of
//! source annotations onto D types, and falls back to `Variant` (and the
//! `broaden` runtime helper) where nothing can be statically typed.

pub mod annot;
pub mod error;
pub mod scope;
pub mod translate;

pub use annot::annotation_to_type;
pub use error::TranslateError;
pub use scope::BindingTracker;
pub use translate::{generate_dlang, Translator, ARRAY_HELPER, WIDEN_HELPER};
