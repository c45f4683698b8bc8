use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::model::ids::NodeId;
use crate::model::path::{PathCategory, PathNode};

const BUILTIN_TREE: &str = include_str!("../../data/career_tree.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TreeError {
    #[error("invalid path tree: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),

    #[error("root node {0} is not defined")]
    MissingRoot(NodeId),

    #[error("node {parent} references unknown child {child}")]
    UnknownChild { parent: NodeId, child: NodeId },

    #[error("root node {0} is listed as a child")]
    RootHasParent(NodeId),

    #[error("node {0} has more than one parent")]
    MultipleParents(NodeId),

    #[error("node {0} is not reachable from the root")]
    Unreachable(NodeId),

    #[error("job node {0} cannot have children")]
    JobWithChildren(NodeId),
}

#[derive(Debug, Deserialize)]
struct TreeAsset {
    #[serde(default)]
    version: u32,
    root: NodeId,
    nodes: Vec<PathNode>,
}

/// Immutable career decision tree stored as a node table.
///
/// Nodes live in a flat arena keyed by id; edges are child-id lists. Loading
/// guarantees a single root, unique ids and that every other node hangs off
/// exactly one parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTree {
    version: u32,
    root: usize,
    nodes: Vec<PathNode>,
    index: HashMap<NodeId, usize>,
}

impl PathTree {
    /// Parse and validate a tree asset.
    ///
    /// # Errors
    ///
    /// Returns `TreeError` for malformed JSON or a node table that does not
    /// form a single rooted tree.
    pub fn from_json(raw: &str) -> Result<Self, TreeError> {
        let asset: TreeAsset = serde_json::from_str(raw)?;
        Self::from_nodes(asset.version, asset.root, asset.nodes)
    }

    /// The career tree shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns `TreeError` if the embedded asset fails validation.
    pub fn builtin() -> Result<Self, TreeError> {
        Self::from_json(BUILTIN_TREE)
    }

    /// Build a tree from a node table.
    ///
    /// # Errors
    ///
    /// Returns `TreeError` if ids repeat, the root or a child is missing, a
    /// node has several parents, a job has children, or some node cannot be
    /// reached from the root.
    pub fn from_nodes(version: u32, root: NodeId, nodes: Vec<PathNode>) -> Result<Self, TreeError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (pos, node) in nodes.iter().enumerate() {
            if index.insert(node.id().clone(), pos).is_some() {
                return Err(TreeError::DuplicateNode(node.id().clone()));
            }
        }
        let root_pos = *index
            .get(&root)
            .ok_or_else(|| TreeError::MissingRoot(root.clone()))?;

        let mut has_parent = vec![false; nodes.len()];
        for node in &nodes {
            if node.category() == PathCategory::Job && !node.is_leaf() {
                return Err(TreeError::JobWithChildren(node.id().clone()));
            }
            for child in node.children() {
                let Some(&child_pos) = index.get(child) else {
                    return Err(TreeError::UnknownChild {
                        parent: node.id().clone(),
                        child: child.clone(),
                    });
                };
                if child_pos == root_pos {
                    return Err(TreeError::RootHasParent(root.clone()));
                }
                if has_parent[child_pos] {
                    return Err(TreeError::MultipleParents(child.clone()));
                }
                has_parent[child_pos] = true;
            }
        }

        let tree = Self {
            version,
            root: root_pos,
            nodes,
            index,
        };

        let mut reached = vec![false; tree.nodes.len()];
        let mut stack = vec![tree.root];
        while let Some(pos) = stack.pop() {
            reached[pos] = true;
            stack.extend(
                tree.nodes[pos]
                    .children()
                    .iter()
                    .filter_map(|c| tree.index.get(c).copied()),
            );
        }
        if let Some(pos) = reached.iter().position(|r| !r) {
            return Err(TreeError::Unreachable(tree.nodes[pos].id().clone()));
        }

        Ok(tree)
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    #[must_use]
    pub fn root(&self) -> &PathNode {
        &self.nodes[self.root]
    }

    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&PathNode> {
        self.index.get(id).map(|&pos| &self.nodes[pos])
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Resolved children of a node, in declaration order.
    #[must_use]
    pub fn children(&self, id: &NodeId) -> Vec<&PathNode> {
        self.node(id)
            .map(|node| node.children().iter().filter_map(|c| self.node(c)).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf walk.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 1_usize)];
        while let Some((pos, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in self.nodes[pos].children() {
                if let Some(&child_pos) = self.index.get(child) {
                    stack.push((child_pos, depth + 1));
                }
            }
        }
        deepest
    }

    /// Leaf nodes in table order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&PathNode> {
        self.nodes.iter().filter(|n| n.is_leaf()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, category: PathCategory, children: &[&str]) -> PathNode {
        PathNode::new(
            id,
            id.to_uppercase(),
            format!("{id} description"),
            category,
            children.iter().map(|c| NodeId::new(*c)).collect(),
        )
    }

    #[test]
    fn builtin_tree_loads() {
        let tree = PathTree::builtin().unwrap();
        assert_eq!(tree.version(), 1);
        assert_eq!(tree.root().id(), &NodeId::new("class-x"));
        assert_eq!(tree.len(), 23);
        assert_eq!(tree.depth(), 8);
        assert_eq!(tree.leaves().len(), 5);
        assert!(tree.leaves().iter().all(|n| n.category() == PathCategory::Job));

        let streams: Vec<_> = tree
            .children(tree.root().id())
            .iter()
            .map(|n| n.title().to_string())
            .collect();
        assert_eq!(streams, vec!["Science Stream", "Commerce Stream"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let nodes = vec![
            node("a", PathCategory::Class, &["b"]),
            node("b", PathCategory::Job, &[]),
            node("b", PathCategory::Job, &[]),
        ];
        let err = PathTree::from_nodes(1, NodeId::new("a"), nodes).unwrap_err();
        assert!(matches!(err, TreeError::DuplicateNode(id) if id.as_str() == "b"));
    }

    #[test]
    fn rejects_unknown_child_and_missing_root() {
        let nodes = vec![node("a", PathCategory::Class, &["ghost"])];
        let err = PathTree::from_nodes(1, NodeId::new("a"), nodes.clone()).unwrap_err();
        assert!(matches!(err, TreeError::UnknownChild { .. }));

        let err = PathTree::from_nodes(1, NodeId::new("z"), nodes).unwrap_err();
        assert!(matches!(err, TreeError::MissingRoot(_)));
    }

    #[test]
    fn rejects_shared_children_and_cycles() {
        let shared = vec![
            node("a", PathCategory::Class, &["b", "c"]),
            node("b", PathCategory::Stream, &["d"]),
            node("c", PathCategory::Stream, &["d"]),
            node("d", PathCategory::Job, &[]),
        ];
        let err = PathTree::from_nodes(1, NodeId::new("a"), shared).unwrap_err();
        assert!(matches!(err, TreeError::MultipleParents(id) if id.as_str() == "d"));

        let detached_cycle = vec![
            node("a", PathCategory::Class, &[]),
            node("b", PathCategory::Stream, &["c"]),
            node("c", PathCategory::Stream, &["b"]),
        ];
        let err = PathTree::from_nodes(1, NodeId::new("a"), detached_cycle).unwrap_err();
        assert!(matches!(err, TreeError::Unreachable(_)));

        let back_to_root = vec![
            node("a", PathCategory::Class, &["b"]),
            node("b", PathCategory::Stream, &["a"]),
        ];
        let err = PathTree::from_nodes(1, NodeId::new("a"), back_to_root).unwrap_err();
        assert!(matches!(err, TreeError::RootHasParent(_)));
    }

    #[test]
    fn rejects_jobs_with_children() {
        let nodes = vec![
            node("a", PathCategory::Job, &["b"]),
            node("b", PathCategory::Job, &[]),
        ];
        let err = PathTree::from_nodes(1, NodeId::new("a"), nodes).unwrap_err();
        assert!(matches!(err, TreeError::JobWithChildren(_)));
    }

    #[test]
    fn supports_arbitrary_depth() {
        let mut nodes = Vec::new();
        for i in 0..50 {
            let child = format!("n{}", i + 1);
            nodes.push(node(&format!("n{i}"), PathCategory::Course, &[child.as_str()]));
        }
        nodes.push(node("n50", PathCategory::Job, &[]));
        let tree = PathTree::from_nodes(1, NodeId::new("n0"), nodes).unwrap();
        assert_eq!(tree.depth(), 51);
    }
}
