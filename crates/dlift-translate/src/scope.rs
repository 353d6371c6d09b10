//! Per-scope binding history.

use std::collections::{HashMap, HashSet};

use dlift_ast::ScopeId;

/// Tracks which identifiers each lexical scope has already declared, so an
/// assignment can be classified as a first binding (emit a declaration) or a
/// rebinding (emit a plain assignment).
///
/// This is a side-table owned by the translator and keyed by the external
/// pass's `ScopeId`, not state attached to the scope objects themselves, so
/// nothing leaks between independent translation runs.
#[derive(Debug, Default)]
pub struct BindingTracker {
    declared: HashMap<ScopeId, HashSet<String>>,
}

impl BindingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify an assignment to `name` in `scope`.
    ///
    /// The first call for a given pair records the declaration and returns
    /// true; every later call returns false without mutating. Call exactly
    /// once per translated assignment node: a second call for the same node
    /// would misclassify it.
    pub fn is_first_binding(&mut self, scope: ScopeId, name: &str) -> bool {
        let seen = self.declared.entry(scope).or_default();
        if seen.contains(name) {
            false
        } else {
            seen.insert(name.to_string());
            true
        }
    }
}
