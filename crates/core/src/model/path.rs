use serde::{Deserialize, Deserializer, Serialize};

use crate::model::ids::NodeId;

/// Kind of step a node represents on the way from school to a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathCategory {
    Class,
    Stream,
    Course,
    Specialization,
    College,
    Exam,
    Job,
}

/// A single node of the career path tree.
///
/// Children are referenced by id; the owning `PathTree` resolves them.
/// Records that nest whole child nodes under `children` and tag the kind as
/// `type` are read too, keeping only the child ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathNode {
    id: NodeId,
    title: String,
    description: String,
    #[serde(alias = "type")]
    category: PathCategory,
    #[serde(default, deserialize_with = "child_ids")]
    children: Vec<NodeId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChildRef {
    Id(NodeId),
    Node { id: NodeId },
}

fn child_ids<'de, D>(deserializer: D) -> Result<Vec<NodeId>, D::Error>
where
    D: Deserializer<'de>,
{
    let refs = Vec::<ChildRef>::deserialize(deserializer)?;
    Ok(refs
        .into_iter()
        .map(|child| match child {
            ChildRef::Id(id) | ChildRef::Node { id } => id,
        })
        .collect())
}

impl PathNode {
    #[must_use]
    pub fn new(
        id: impl Into<NodeId>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: PathCategory,
        children: Vec<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category,
            children,
        }
    }

    #[must_use]
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn category(&self) -> PathCategory {
        self.category
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
