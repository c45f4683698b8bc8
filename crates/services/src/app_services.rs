use std::sync::Arc;

use guide_core::model::{PathTree, SubjectCatalog};
use storage::repository::{KeyValueStore, Storage};

use crate::assessment_service::AssessmentService;
use crate::config::AppConfig;
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::roadmap_service::RoadmapService;

/// Assembles the app-facing services over one shared store.
#[derive(Clone, Debug)]
pub struct AppServices {
    assessments: Arc<AssessmentService>,
    roadmaps: Arc<RoadmapService>,
    dashboard: Arc<DashboardService>,
}

impl AppServices {
    /// Build services from configuration, backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if an asset fails to load or storage
    /// initialization fails.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppServicesError> {
        let catalog = config.load_catalog()?;
        let tree = config.load_tree()?;
        let storage = Storage::sqlite(&config.db_url).await?;
        tracing::info!(db_url = %config.db_url, "storage ready");
        Ok(Self::assemble(
            storage.kv,
            catalog,
            tree,
            config.require_answer,
        ))
    }

    /// Build services backed by `SQLite` storage with the bundled assets.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let config = AppConfig {
            db_url: db_url.to_string(),
            ..AppConfig::default()
        };
        Self::from_config(&config).await
    }

    /// Build services over an in-memory store with the bundled assets.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if a bundled asset fails to load.
    pub fn in_memory() -> Result<Self, AppServicesError> {
        let config = AppConfig::default();
        Ok(Self::assemble(
            Storage::in_memory().kv,
            config.load_catalog()?,
            config.load_tree()?,
            config.require_answer,
        ))
    }

    fn assemble(
        store: Arc<dyn KeyValueStore>,
        catalog: SubjectCatalog,
        tree: PathTree,
        require_answer: bool,
    ) -> Self {
        let assessments = AssessmentService::new(Arc::new(catalog), Arc::clone(&store))
            .with_require_answer(require_answer);
        let roadmaps = RoadmapService::new(Arc::new(tree), store);
        let dashboard = DashboardService::new(assessments.clone(), roadmaps.clone());

        Self {
            assessments: Arc::new(assessments),
            roadmaps: Arc::new(roadmaps),
            dashboard: Arc::new(dashboard),
        }
    }

    #[must_use]
    pub fn assessments(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessments)
    }

    #[must_use]
    pub fn roadmaps(&self) -> Arc<RoadmapService> {
        Arc::clone(&self.roadmaps)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn services_share_one_store() {
        let services = AppServices::in_memory().unwrap();
        let roadmaps = services.roadmaps();
        let mut nav = roadmaps.navigator();
        nav.select(&roadmaps.tree().root().id().clone()).unwrap();
        roadmaps.save_path(&nav).await.unwrap();

        let overview = services.dashboard().overview().await.unwrap();
        assert_eq!(overview.saved_path_count, 1);
        assert_eq!(overview.destinations, vec!["Class X".to_string()]);
        assert!(overview.strongest.is_none());
    }

    #[tokio::test]
    async fn sqlite_backed_services_start_empty() {
        let services =
            AppServices::new_sqlite("sqlite:file:memdb_app_services?mode=memory&cache=shared")
                .await
                .unwrap();
        assert!(services.assessments().latest_results().await.unwrap().is_none());
        assert!(services.roadmaps().saved_paths().await.unwrap().is_empty());
    }
}
