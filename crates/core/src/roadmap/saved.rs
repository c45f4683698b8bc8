use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::PathNode;

/// Snapshot of a root-to-node walk taken when the user saved it.
///
/// Nodes are copied, so a saved path stays intact whatever happens to the
/// live navigation afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedPath {
    nodes: Vec<PathNode>,
}

impl SavedPath {
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyPath` when `nodes` is empty.
    pub fn new(nodes: Vec<PathNode>) -> Result<Self, ValidationError> {
        if nodes.is_empty() {
            return Err(ValidationError::EmptyPath);
        }
        Ok(Self { nodes })
    }

    #[must_use]
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node the path ends on.
    #[must_use]
    pub fn destination(&self) -> Option<&PathNode> {
        self.nodes.last()
    }

    /// Up to the last `n` nodes, for compact breadcrumbs.
    #[must_use]
    pub fn tail(&self, n: usize) -> &[PathNode] {
        let start = self.nodes.len().saturating_sub(n);
        &self.nodes[start..]
    }
}
