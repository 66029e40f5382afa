//! Diagram-global name registry used during resolution
//!
//! State names must be unique across the whole diagram regardless of nesting
//! depth, so a single flat table serves every scope. The table lives only for
//! the duration of one resolution call.

use std::collections::HashMap;

use crate::error::SemanticError;
use crate::machine::model::VertexId;

/// Flat mapping from state short name to its vertex handle
#[derive(Debug, Default)]
pub(crate) struct VertexLookup {
    vertices: HashMap<String, VertexId>,
}

impl VertexLookup {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a name, rejecting redefinitions
    pub(crate) fn insert(&mut self, name: &str, id: VertexId) -> Result<(), SemanticError> {
        if self.vertices.contains_key(name) {
            return Err(SemanticError::duplicate_vertex(name.to_string()));
        }
        self.vertices.insert(name.to_string(), id);
        Ok(())
    }

    /// Resolve a name to its vertex handle
    pub(crate) fn get(&self, name: &str) -> Option<VertexId> {
        self.vertices.get(name).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.vertices.len()
    }
}
