use std::fmt;
use std::sync::Arc;

use guide_core::model::PathTree;
use guide_core::roadmap::{PathNavigator, SavedPath};
use storage::json;
use storage::repository::{KeyValueStore, keys};

use crate::error::RoadmapServiceError;

/// Hands out navigators over the career tree and keeps the saved paths.
#[derive(Clone)]
pub struct RoadmapService {
    tree: Arc<PathTree>,
    store: Arc<dyn KeyValueStore>,
}

impl RoadmapService {
    #[must_use]
    pub fn new(tree: Arc<PathTree>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { tree, store }
    }

    #[must_use]
    pub fn tree(&self) -> &Arc<PathTree> {
        &self.tree
    }

    /// A fresh navigator positioned before the root.
    #[must_use]
    pub fn navigator(&self) -> PathNavigator {
        PathNavigator::new(Arc::clone(&self.tree))
    }

    /// Append the navigator's current path to the saved collection.
    ///
    /// Loads the whole collection, appends a copy and writes it back.
    /// Returns the collection size after saving.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapServiceError::Validation` when nothing is selected, or
    /// `RoadmapServiceError::Storage` if the collection cannot be read or
    /// written.
    pub async fn save_path(&self, navigator: &PathNavigator) -> Result<usize, RoadmapServiceError> {
        let snapshot = navigator.snapshot()?;
        let mut saved = self.saved_paths().await?;
        let destination = snapshot
            .destination()
            .map(|node| node.title().to_string())
            .unwrap_or_default();
        saved.push(snapshot);
        json::store(self.store.as_ref(), keys::SAVED_PATHS, &saved).await?;
        tracing::info!(%destination, saved = saved.len(), "career path saved");
        Ok(saved.len())
    }

    /// Every saved path, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapServiceError::Storage` if the collection cannot be read.
    pub async fn saved_paths(&self) -> Result<Vec<SavedPath>, RoadmapServiceError> {
        let saved: Option<Vec<SavedPath>> =
            json::load(self.store.as_ref(), keys::SAVED_PATHS).await?;
        Ok(saved.unwrap_or_default())
    }

    /// The last `n` saved paths, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapServiceError::Storage` if the collection cannot be read.
    pub async fn recent_saved(&self, n: usize) -> Result<Vec<SavedPath>, RoadmapServiceError> {
        let mut saved = self.saved_paths().await?;
        let start = saved.len().saturating_sub(n);
        Ok(saved.split_off(start))
    }
}

impl fmt::Debug for RoadmapService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoadmapService")
            .field("tree_len", &self.tree.len())
            .finish_non_exhaustive()
    }
}
