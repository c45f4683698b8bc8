use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use thiserror::Error;

use crate::model::question::{Question, QuestionDraft, QuestionError};

const BUILTIN_CATALOG: &str = include_str!("../../data/question_bank.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("invalid question bank: {0}")]
    Json(#[from] serde_json::Error),

    #[error("subject listed twice: {0}")]
    DuplicateSubject(String),

    #[error("subject name cannot be empty")]
    EmptySubject,

    #[error("questions given for unlisted subject: {0}")]
    UnlistedSubject(String),

    #[error("question {index} of {subject} is invalid: {source}")]
    InvalidQuestion {
        subject: String,
        index: usize,
        #[source]
        source: QuestionError,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogAsset {
    #[serde(default)]
    version: u32,
    subjects: Vec<String>,
    #[serde(default)]
    questions: HashMap<String, Vec<QuestionDraft>>,
    #[serde(default)]
    career_suggestions: HashMap<String, String>,
    #[serde(default)]
    default_suggestion: String,
}

/// Static bank of subjects and their questions.
///
/// Subject order is the order of the asset's `subjects` list; it drives the
/// picker, search results and random sampling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectCatalog {
    version: u32,
    subjects: Vec<String>,
    questions: HashMap<String, Vec<Question>>,
    career_suggestions: HashMap<String, String>,
    default_suggestion: String,
}

impl SubjectCatalog {
    /// Parse and validate a question bank asset.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed, a subject is listed
    /// twice or blank, questions reference an unlisted subject, or any
    /// question fails validation.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let asset: CatalogAsset = serde_json::from_str(raw)?;

        let mut seen = HashSet::new();
        for subject in &asset.subjects {
            if subject.trim().is_empty() {
                return Err(CatalogError::EmptySubject);
            }
            if !seen.insert(subject.as_str()) {
                return Err(CatalogError::DuplicateSubject(subject.clone()));
            }
        }

        let mut questions = HashMap::with_capacity(asset.questions.len());
        for (subject, drafts) in asset.questions {
            if !seen.contains(subject.as_str()) {
                return Err(CatalogError::UnlistedSubject(subject));
            }
            let mut validated = Vec::with_capacity(drafts.len());
            for (index, draft) in drafts.into_iter().enumerate() {
                let question =
                    draft
                        .validate(&subject)
                        .map_err(|source| CatalogError::InvalidQuestion {
                            subject: subject.clone(),
                            index,
                            source,
                        })?;
                validated.push(question);
            }
            questions.insert(subject, validated);
        }

        Ok(Self {
            version: asset.version,
            subjects: asset.subjects,
            questions,
            career_suggestions: asset.career_suggestions,
            default_suggestion: asset.default_suggestion,
        })
    }

    /// The question bank shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded asset fails validation.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// All subjects in catalog order, including those without questions.
    #[must_use]
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    #[must_use]
    pub fn contains(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    #[must_use]
    pub fn has_questions(&self, subject: &str) -> bool {
        self.questions.get(subject).is_some_and(|q| !q.is_empty())
    }

    /// Questions for a subject in bank order; empty for unbanked subjects.
    #[must_use]
    pub fn questions_for(&self, subject: &str) -> &[Question] {
        self.questions
            .get(subject)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Subjects that carry at least one question, in catalog order.
    #[must_use]
    pub fn banked_subjects(&self) -> Vec<&str> {
        self.subjects
            .iter()
            .map(String::as_str)
            .filter(|s| self.has_questions(s))
            .collect()
    }

    /// Case-insensitive substring search over subject names.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&str> {
        let needle = term.trim().to_lowercase();
        self.subjects
            .iter()
            .map(String::as_str)
            .filter(|s| s.to_lowercase().contains(&needle))
            .collect()
    }

    /// Recommended career fields for a subject, falling back to the general suggestion.
    #[must_use]
    pub fn career_suggestion(&self, subject: &str) -> &str {
        self.career_suggestions
            .get(subject)
            .map_or(self.default_suggestion.as_str(), String::as_str)
    }
}
