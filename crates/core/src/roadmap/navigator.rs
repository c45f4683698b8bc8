use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::error::ValidationError;
use crate::model::{NodeId, PathNode, PathTree};

use super::saved::SavedPath;

/// Misuse of the navigator by its caller, as opposed to a user-facing error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavigationError {
    #[error("node {0} is not among the visible options")]
    NotSelectable(NodeId),
}

/// Walks a `PathTree` one choice at a time.
///
/// `selected` is the breadcrumb from the root to the current node.
/// `visible` lists the options offered next: the root alone before any
/// choice, otherwise the children of the last selected node. Picking a leaf
/// keeps the sibling options on screen; stepping back onto a leaf leaves
/// nothing to pick until the user steps back again.
#[derive(Clone)]
pub struct PathNavigator {
    tree: Arc<PathTree>,
    selected: Vec<NodeId>,
    visible: Vec<NodeId>,
}

impl PathNavigator {
    #[must_use]
    pub fn new(tree: Arc<PathTree>) -> Self {
        let visible = vec![tree.root().id().clone()];
        Self {
            tree,
            selected: Vec::new(),
            visible,
        }
    }

    /// Drop all selections and show the root again.
    pub fn restart(&mut self) {
        self.selected.clear();
        self.visible = vec![self.tree.root().id().clone()];
    }

    #[must_use]
    pub fn tree(&self) -> &Arc<PathTree> {
        &self.tree
    }

    /// Breadcrumb from the root to the current node.
    #[must_use]
    pub fn selected_path(&self) -> Vec<&PathNode> {
        self.resolve(&self.selected)
    }

    /// Options the user can pick next.
    #[must_use]
    pub fn visible_options(&self) -> Vec<&PathNode> {
        self.resolve(&self.visible)
    }

    #[must_use]
    pub fn current(&self) -> Option<&PathNode> {
        self.selected.last().and_then(|id| self.tree.node(id))
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_at_start(&self) -> bool {
        self.selected.is_empty()
    }

    #[must_use]
    pub fn is_visible(&self, id: &NodeId) -> bool {
        self.visible.contains(id)
    }

    /// Pick one of the visible options.
    ///
    /// Returns `Ok(false)` without changing anything when `id` is already the
    /// current node, which keeps the breadcrumb free of consecutive
    /// duplicates when a leaf is picked twice.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::NotSelectable` if `id` is not visible.
    pub fn select(&mut self, id: &NodeId) -> Result<bool, NavigationError> {
        if !self.is_visible(id) {
            return Err(NavigationError::NotSelectable(id.clone()));
        }
        if self.selected.last() == Some(id) {
            return Ok(false);
        }
        let Some(node) = self.tree.node(id) else {
            return Err(NavigationError::NotSelectable(id.clone()));
        };
        if !node.is_leaf() {
            self.visible = node.children().to_vec();
        }
        self.selected.push(id.clone());
        Ok(true)
    }

    /// Undo the last selection. Does nothing at the start.
    ///
    /// The options become the children of the new last node, or the root
    /// once the breadcrumb is empty. Returns the node that was removed.
    pub fn back(&mut self) -> Option<NodeId> {
        let removed = self.selected.pop()?;
        self.visible = match self.selected.last() {
            Some(id) => self
                .tree
                .node(id)
                .map(|node| node.children().to_vec())
                .unwrap_or_default(),
            None => vec![self.tree.root().id().clone()],
        };
        Some(removed)
    }

    /// Copy of the current breadcrumb.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyPath` when nothing is selected.
    pub fn snapshot(&self) -> Result<SavedPath, ValidationError> {
        SavedPath::new(self.selected_path().into_iter().cloned().collect())
    }

    fn resolve(&self, ids: &[NodeId]) -> Vec<&PathNode> {
        ids.iter().filter_map(|id| self.tree.node(id)).collect()
    }
}

impl fmt::Debug for PathNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathNavigator")
            .field("tree_len", &self.tree.len())
            .field("selected", &self.selected)
            .field("visible", &self.visible)
            .finish()
    }
}
