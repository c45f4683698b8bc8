use crate::error::ValidationError;
use crate::model::SubjectCatalog;

/// Maximum number of subjects a custom test may cover.
pub const MAX_SUBJECTS: usize = 5;

/// Subjects picked for a custom test, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectSelection {
    subjects: Vec<String>,
}

impl SubjectSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subject to the selection.
    ///
    /// Returns `Ok(false)` when the subject is already selected or the
    /// selection is full.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownSubject` if the catalog does not list it.
    pub fn add(&mut self, catalog: &SubjectCatalog, subject: &str) -> Result<bool, ValidationError> {
        if !catalog.contains(subject) {
            return Err(ValidationError::UnknownSubject(subject.to_string()));
        }
        if self.contains(subject) || self.is_full() {
            return Ok(false);
        }
        self.subjects.push(subject.to_string());
        Ok(true)
    }

    /// Remove a subject; returns whether it was selected.
    pub fn remove(&mut self, subject: &str) -> bool {
        let before = self.subjects.len();
        self.subjects.retain(|s| s != subject);
        before != self.subjects.len()
    }

    /// Replace the whole selection, e.g. with the subjects of a random test.
    pub fn replace(&mut self, subjects: Vec<String>) {
        self.subjects = subjects;
    }

    pub fn clear(&mut self) {
        self.subjects.clear();
    }

    #[must_use]
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    #[must_use]
    pub fn contains(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.subjects.len() >= MAX_SUBJECTS
    }

    /// Number of questions a custom test over this selection would contain.
    #[must_use]
    pub fn question_count(&self, catalog: &SubjectCatalog) -> usize {
        self.subjects
            .iter()
            .map(|s| catalog.questions_for(s).len())
            .sum()
    }
}
