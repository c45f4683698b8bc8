use guide_core::model::{ResultSet, SubjectScore};
use guide_core::roadmap::SavedPath;

use crate::assessment_service::AssessmentService;
use crate::error::DashboardServiceError;
use crate::roadmap_service::RoadmapService;

/// Number of saved paths previewed on the dashboard.
pub const PATH_PREVIEW_COUNT: usize = 3;

/// Everything the dashboard shows, read in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardOverview {
    /// Latest assessment results; empty before the first test.
    pub results: ResultSet,
    pub strongest: Option<SubjectScore>,
    /// Career suggestion for the strongest subject.
    pub suggestion: Option<String>,
    pub saved_path_count: usize,
    /// Title of the last node of each saved path, oldest first.
    pub destinations: Vec<String>,
    pub first_paths: Vec<SavedPath>,
}

/// Read-only summary across assessments and saved paths.
#[derive(Debug, Clone)]
pub struct DashboardService {
    assessments: AssessmentService,
    roadmaps: RoadmapService,
}

impl DashboardService {
    #[must_use]
    pub fn new(assessments: AssessmentService, roadmaps: RoadmapService) -> Self {
        Self {
            assessments,
            roadmaps,
        }
    }

    /// Gather the dashboard data. Missing entries read as empty.
    ///
    /// # Errors
    ///
    /// Returns `DashboardServiceError` if either collection cannot be read.
    pub async fn overview(&self) -> Result<DashboardOverview, DashboardServiceError> {
        let results = self
            .assessments
            .latest_results()
            .await?
            .unwrap_or_default();
        let saved = self.roadmaps.saved_paths().await?;

        let strongest = results.strongest().cloned();
        let suggestion = strongest
            .as_ref()
            .map(|best| self.assessments.career_suggestion(&best.subject).to_string());
        let destinations = saved
            .iter()
            .filter_map(SavedPath::destination)
            .map(|node| node.title().to_string())
            .collect();
        let first_paths = saved.iter().take(PATH_PREVIEW_COUNT).cloned().collect();

        Ok(DashboardOverview {
            results,
            strongest,
            suggestion,
            saved_path_count: saved.len(),
            destinations,
            first_paths,
        })
    }
}
