//! Contract types for the external scope-resolution pass.
//!
//! Scope resolution runs over the full parse tree before translation and
//! decides, for every binding-introducing name node, which lexical scope
//! owns the binding. The translator only consumes the result; it never
//! resolves scopes itself.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ast::NodeId;

/// Opaque identity of a lexical scope, assigned by the resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeId(pub u32);

/// Output of the scope-resolution pass: binding name node -> owning scope.
///
/// Two unrelated translations must each get their own `ScopeResolution`;
/// nothing in here is shared or global.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeResolution {
    bindings: HashMap<NodeId, ScopeId>,
}

impl ScopeResolution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the name node `node` binds in `scope`. Called by the
    /// resolution pass while it walks the tree.
    pub fn bind(&mut self, node: NodeId, scope: ScopeId) {
        self.bindings.insert(node, scope);
    }

    /// The scope owning the binding introduced at `node`, if the resolution
    /// pass saw that node.
    pub fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
        self.bindings.get(&node).copied()
    }

    /// Number of resolved binding nodes.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
