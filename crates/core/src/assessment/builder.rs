use rand::Rng;

use crate::error::ValidationError;
use crate::model::SubjectCatalog;

use super::sampler::sample_without_replacement;
use super::selection::MAX_SUBJECTS;
use super::session::QuizSession;

/// Number of subjects drawn for a random test.
pub const RANDOM_SUBJECT_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestMode {
    /// Questions from subjects the user picked.
    Custom,
    /// Questions from subjects drawn at random from the catalog.
    Random,
}

/// Builds quiz sessions from a subject catalog.
pub struct TestBuilder<'a> {
    catalog: &'a SubjectCatalog,
    require_answer: bool,
}

impl<'a> TestBuilder<'a> {
    /// Sessions built here refuse to advance past unanswered questions
    /// unless configured otherwise.
    #[must_use]
    pub fn new(catalog: &'a SubjectCatalog) -> Self {
        Self {
            catalog,
            require_answer: true,
        }
    }

    #[must_use]
    pub fn with_require_answer(mut self, require_answer: bool) -> Self {
        self.require_answer = require_answer;
        self
    }

    /// Build a test in the given mode. `subjects` is ignored for `TestMode::Random`.
    ///
    /// # Errors
    ///
    /// See [`TestBuilder::custom`] and [`TestBuilder::random`].
    pub fn build<S, R>(
        &self,
        subjects: &[S],
        mode: TestMode,
        rng: &mut R,
    ) -> Result<QuizSession, ValidationError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        match mode {
            TestMode::Custom => self.custom(subjects),
            TestMode::Random => self.random(rng).map(|(session, _)| session),
        }
    }

    /// Build a test over the chosen subjects, in the order given.
    ///
    /// Repeated subjects are collapsed to their first occurrence. Subjects
    /// without a question bank contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NoSubjects` for an empty choice,
    /// `TooManySubjects` above the limit, `UnknownSubject` for names the
    /// catalog does not list and `NoQuestions` when none of the subjects
    /// has questions.
    pub fn custom<S: AsRef<str>>(&self, subjects: &[S]) -> Result<QuizSession, ValidationError> {
        if subjects.is_empty() {
            return Err(ValidationError::NoSubjects);
        }

        let mut chosen: Vec<&str> = Vec::with_capacity(subjects.len());
        for subject in subjects {
            let subject = subject.as_ref();
            if !self.catalog.contains(subject) {
                return Err(ValidationError::UnknownSubject(subject.to_string()));
            }
            if !chosen.contains(&subject) {
                chosen.push(subject);
            }
        }
        if chosen.len() > MAX_SUBJECTS {
            return Err(ValidationError::TooManySubjects {
                max: MAX_SUBJECTS,
                got: chosen.len(),
            });
        }

        self.assemble(&chosen)
    }

    /// Build a test over `RANDOM_SUBJECT_COUNT` subjects drawn uniformly
    /// without replacement from the whole catalog.
    ///
    /// Returns the session together with the drawn subjects. Drawn subjects
    /// without a question bank contribute nothing, as in custom tests.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NoQuestions` when none of the drawn subjects
    /// has questions; drawing again may succeed.
    pub fn random<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(QuizSession, Vec<String>), ValidationError> {
        let drawn: Vec<&str> =
            sample_without_replacement(self.catalog.subjects(), RANDOM_SUBJECT_COUNT, rng)
                .into_iter()
                .map(String::as_str)
                .collect();
        let session = self.assemble(&drawn)?;
        Ok((session, drawn.into_iter().map(str::to_string).collect()))
    }

    fn assemble(&self, subjects: &[&str]) -> Result<QuizSession, ValidationError> {
        let questions: Vec<_> = subjects
            .iter()
            .flat_map(|s| self.catalog.questions_for(s).iter().cloned())
            .collect();
        if questions.is_empty() {
            return Err(ValidationError::NoQuestions);
        }
        Ok(QuizSession::new(questions, self.require_answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use rand::rngs::StdRng;

    const NONE: [&str; 0] = [];

    #[test]
    fn empty_custom_selection_is_rejected() {
        let catalog = SubjectCatalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let err = TestBuilder::new(&catalog)
            .build(&NONE, TestMode::Custom, &mut rng)
            .unwrap_err();
        assert_eq!(err, ValidationError::NoSubjects);
    }

    #[test]
    fn custom_concatenates_in_selection_order() {
        let catalog = SubjectCatalog::builtin().unwrap();
        let session = TestBuilder::new(&catalog)
            .custom(&["Physics", "Mathematics", "Physics"])
            .unwrap();
        assert_eq!(session.len(), 10);
        assert_eq!(session.subjects(), vec!["Physics", "Mathematics"]);
        assert_eq!(session.questions()[0].text(), "What is Newton's first law?");
        assert_eq!(session.questions()[5].text(), "What is the derivative of x²?");
    }

    #[test]
    fn custom_rejects_more_than_five_subjects() {
        let catalog = SubjectCatalog::builtin().unwrap();
        let subjects = [
            "Mathematics",
            "Physics",
            "Chemistry",
            "Biology",
            "Computer Science",
            "History",
        ];
        let err = TestBuilder::new(&catalog).custom(&subjects).unwrap_err();
        assert_eq!(err, ValidationError::TooManySubjects { max: 5, got: 6 });
    }

    #[test]
    fn custom_rejects_unknown_and_unbanked_only() {
        let catalog = SubjectCatalog::builtin().unwrap();
        let builder = TestBuilder::new(&catalog);
        assert_eq!(
            builder.custom(&["Alchemy"]).unwrap_err(),
            ValidationError::UnknownSubject("Alchemy".into())
        );
        assert_eq!(
            builder.custom(&["History", "Music"]).unwrap_err(),
            ValidationError::NoQuestions
        );
        // unbanked subjects are skipped next to banked ones
        assert_eq!(builder.custom(&["History", "Biology"]).unwrap().len(), 5);
    }

    #[test]
    fn random_draws_from_whole_catalog() {
        let catalog = SubjectCatalog::builtin().unwrap();
        let builder = TestBuilder::new(&catalog);
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen: HashSet<String> = HashSet::new();
        let mut empty_draws = 0;

        for _ in 0..2000 {
            match builder.random(&mut rng) {
                Ok((session, drawn)) => {
                    assert_eq!(drawn.len(), RANDOM_SUBJECT_COUNT);
                    let distinct: HashSet<&String> = drawn.iter().collect();
                    assert_eq!(distinct.len(), RANDOM_SUBJECT_COUNT);
                    assert!(drawn.iter().all(|s| catalog.contains(s)));

                    let banked: Vec<&str> = drawn
                        .iter()
                        .map(String::as_str)
                        .filter(|s| catalog.has_questions(s))
                        .collect();
                    assert_eq!(session.subjects(), banked);
                    assert_eq!(session.len(), banked.len() * 5);
                    seen.extend(drawn);
                }
                Err(err) => {
                    assert_eq!(err, ValidationError::NoQuestions);
                    empty_draws += 1;
                }
            }
        }

        assert_eq!(seen.len(), catalog.subjects().len());
        assert!(empty_draws > 0);
    }

    #[test]
    fn build_random_ignores_given_subjects() {
        let catalog = SubjectCatalog::builtin().unwrap();
        let builder = TestBuilder::new(&catalog);
        let session = (0..)
            .find_map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                builder.build(&["Art"], TestMode::Random, &mut rng).ok()
            })
            .unwrap();
        assert!((1..=RANDOM_SUBJECT_COUNT).contains(&session.subjects().len()));
        assert!(session.answers().iter().all(Option::is_none));
    }
}
