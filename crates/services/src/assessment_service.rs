use std::fmt;
use std::sync::Arc;

use rand::Rng;

use guide_core::assessment::{QuizSession, Step, TestBuilder, TestMode};
use guide_core::model::{ResultSet, SubjectCatalog};
use storage::json;
use storage::repository::{KeyValueStore, StorageError, keys};

use crate::error::AssessmentServiceError;

/// Builds tests from the subject catalog and stores their results.
///
/// Sessions are driven by the caller; the service only steps in where a
/// session transition has a persistence side effect.
#[derive(Clone)]
pub struct AssessmentService {
    catalog: Arc<SubjectCatalog>,
    store: Arc<dyn KeyValueStore>,
    require_answer: bool,
}

impl AssessmentService {
    #[must_use]
    pub fn new(catalog: Arc<SubjectCatalog>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            catalog,
            store,
            require_answer: true,
        }
    }

    /// Whether new sessions refuse to advance past unanswered questions.
    #[must_use]
    pub fn with_require_answer(mut self, require_answer: bool) -> Self {
        self.require_answer = require_answer;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &SubjectCatalog {
        &self.catalog
    }

    /// Career suggestion for a subject, falling back to the general one.
    #[must_use]
    pub fn career_suggestion(&self, subject: &str) -> &str {
        self.catalog.career_suggestion(subject)
    }

    fn builder(&self) -> TestBuilder<'_> {
        TestBuilder::new(&self.catalog).with_require_answer(self.require_answer)
    }

    //
    // ─── STARTING A TEST ───────────────────────────────────────────────────────
    //

    /// Build a test in `mode`, drawing random subjects from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Validation` if the subject choice is
    /// rejected.
    pub fn build_test<S, R>(
        &self,
        subjects: &[S],
        mode: TestMode,
        rng: &mut R,
    ) -> Result<QuizSession, AssessmentServiceError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let session = self.builder().build(subjects, mode, rng)?;
        tracing::info!(?mode, questions = session.len(), "assessment started");
        Ok(session)
    }

    /// Build a test over the chosen subjects.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Validation` for an empty, oversized or
    /// unknown subject choice, or one without any questions.
    pub fn start_custom<S: AsRef<str>>(
        &self,
        subjects: &[S],
    ) -> Result<QuizSession, AssessmentServiceError> {
        let session = self.builder().custom(subjects)?;
        tracing::info!(
            subjects = ?session.subjects(),
            questions = session.len(),
            "custom assessment started"
        );
        Ok(session)
    }

    /// Build a test over randomly drawn subjects using the thread RNG.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Validation` when none of the drawn
    /// subjects has questions; the caller may draw again.
    pub fn start_random(&self) -> Result<(QuizSession, Vec<String>), AssessmentServiceError> {
        self.start_random_with(&mut rand::rng())
    }

    /// Same as [`AssessmentService::start_random`] with a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Validation` when none of the drawn
    /// subjects has questions.
    pub fn start_random_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(QuizSession, Vec<String>), AssessmentServiceError> {
        let (session, drawn) = self.builder().random(rng)?;
        tracing::info!(subjects = ?drawn, questions = session.len(), "random assessment started");
        Ok((session, drawn))
    }

    //
    // ─── FINISHING A TEST ──────────────────────────────────────────────────────
    //

    /// Move the session forward, storing the results when it finishes.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Session` if the session refuses to
    /// move, or `AssessmentServiceError::Unsaved` if it finished but the
    /// results could not be stored.
    pub async fn advance(&self, session: &mut QuizSession) -> Result<Step, AssessmentServiceError> {
        match session.advance()? {
            Step::Finished(results) => {
                self.persist(&results).await?;
                Ok(Step::Finished(results))
            }
            moved => Ok(moved),
        }
    }

    /// Score the session now and store the results, replacing earlier ones.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Session` if the session was already
    /// finished, or `AssessmentServiceError::Unsaved` if the results could not
    /// be stored.
    pub async fn finish(
        &self,
        session: &mut QuizSession,
    ) -> Result<ResultSet, AssessmentServiceError> {
        let results = session.finish()?;
        self.persist(&results).await?;
        Ok(results)
    }

    /// Store `results` as the latest assessment outcome.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store rejects the write.
    pub async fn save_results(&self, results: &ResultSet) -> Result<(), StorageError> {
        json::store(self.store.as_ref(), keys::ASSESSMENT_RESULTS, results).await?;
        tracing::debug!(subjects = results.len(), "assessment results stored");
        Ok(())
    }

    /// Most recently stored results, if any.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Storage` if the store cannot be read
    /// or holds an unreadable value.
    pub async fn latest_results(&self) -> Result<Option<ResultSet>, AssessmentServiceError> {
        Ok(json::load(self.store.as_ref(), keys::ASSESSMENT_RESULTS).await?)
    }

    async fn persist(&self, results: &ResultSet) -> Result<(), AssessmentServiceError> {
        match self.save_results(results).await {
            Ok(()) => {
                if let Some(best) = results.strongest() {
                    tracing::info!(
                        strongest = %best.subject,
                        percentage = best.percentage,
                        "assessment finished"
                    );
                }
                Ok(())
            }
            Err(source) => {
                tracing::warn!(error = %source, "assessment results not saved");
                Err(AssessmentServiceError::Unsaved {
                    results: results.clone(),
                    source,
                })
            }
        }
    }
}

impl fmt::Debug for AssessmentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentService")
            .field("subjects", &self.catalog.subjects().len())
            .field("require_answer", &self.require_answer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guide_core::ValidationError;
    use guide_core::model::Choice;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use storage::repository::InMemoryStore;

    fn service() -> AssessmentService {
        let catalog = Arc::new(SubjectCatalog::builtin().unwrap());
        AssessmentService::new(catalog, Arc::new(InMemoryStore::new()))
    }

    #[test]
    fn empty_custom_choice_is_rejected() {
        let err = service().start_custom::<&str>(&[]).unwrap_err();
        assert!(matches!(
            err,
            AssessmentServiceError::Validation(ValidationError::NoSubjects)
        ));
    }

    #[test]
    fn random_test_draws_three_catalog_subjects() {
        let service = service();
        let mut rng = StdRng::seed_from_u64(11);
        let (session, drawn) = (0..50)
            .find_map(|_| service.start_random_with(&mut rng).ok())
            .unwrap();
        assert_eq!(drawn.len(), 3);
        assert!(drawn.iter().all(|s| service.catalog().contains(s)));
        let banked: Vec<&str> = drawn
            .iter()
            .map(String::as_str)
            .filter(|s| service.catalog().has_questions(s))
            .collect();
        assert_eq!(session.subjects(), banked);
    }

    #[test]
    fn random_draw_without_questions_is_recoverable() {
        let service = service();
        let mut rng = StdRng::seed_from_u64(23);
        let err = (0..200)
            .find_map(|_| service.start_random_with(&mut rng).err())
            .unwrap();
        assert!(matches!(
            err,
            AssessmentServiceError::Validation(ValidationError::NoQuestions)
        ));
    }

    #[test]
    fn build_test_ignores_subjects_in_random_mode() {
        let service = service();
        let mut rng = StdRng::seed_from_u64(5);
        let session = (0..50)
            .find_map(|_| {
                service
                    .build_test(&["Art"], TestMode::Random, &mut rng)
                    .ok()
            })
            .unwrap();
        assert!((1..=3).contains(&session.subjects().len()));
    }

    #[tokio::test]
    async fn finish_replaces_stored_results() {
        let service = service();
        let mut first = service.start_custom(&["Physics"]).unwrap();
        first.select_answer(Choice::A).unwrap();
        service.finish(&mut first).await.unwrap();

        let mut second = service.start_custom(&["Chemistry"]).unwrap();
        let results = service.finish(&mut second).await.unwrap();

        let stored = service.latest_results().await.unwrap().unwrap();
        assert_eq!(stored, results);
        assert_eq!(stored.scores()[0].subject, "Chemistry");
    }

    #[tokio::test]
    async fn nothing_stored_before_first_test() {
        assert!(service().latest_results().await.unwrap().is_none());
    }
}
