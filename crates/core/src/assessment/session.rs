use std::fmt;

use thiserror::Error;

use crate::error::ValidationError;
use crate::model::{Choice, Question, ResultSet};

use super::scoring::score_session;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("session already finished")]
    Finished,
}

/// Outcome of moving forward in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Moved to the question at `index`.
    Moved { index: usize },
    /// The last question was passed and the session was scored.
    Finished(ResultSet),
}

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub is_finished: bool,
}

impl QuizProgress {
    /// Share of the quiz reached, counting the current question.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.position as f64 / self.total as f64
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One assessment attempt: the questions, the answer given to each, and a
/// cursor on the current question.
///
/// Sessions are created by `TestBuilder` and always hold at least one
/// question. `answers` stays the same length as `questions`; `None` marks an
/// unanswered question.
#[derive(Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    answers: Vec<Option<Choice>>,
    current: usize,
    require_answer: bool,
    finished: bool,
}

impl QuizSession {
    pub(crate) fn new(questions: Vec<Question>, require_answer: bool) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            answers,
            current: 0,
            require_answer,
            finished: false,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<Choice>] {
        &self.answers
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<Choice> {
        self.answers[self.current]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    /// True on the last question, where advancing finishes the test.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether `advance` refuses to move past an unanswered question.
    #[must_use]
    pub fn requires_answer(&self) -> bool {
        self.require_answer
    }

    /// Distinct subjects in order of first appearance.
    #[must_use]
    pub fn subjects(&self) -> Vec<&str> {
        let mut subjects: Vec<&str> = Vec::new();
        for question in &self.questions {
            if !subjects.contains(&question.subject()) {
                subjects.push(question.subject());
            }
        }
        subjects
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            position: self.current + 1,
            total: self.questions.len(),
            answered: self.answered_count(),
            is_finished: self.finished,
        }
    }

    /// Record `choice` for the current question, replacing any earlier answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` once the session has been scored.
    pub fn select_answer(&mut self, choice: Choice) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.answers[self.current] = Some(choice);
        Ok(())
    }

    /// Move to the next question, or score the session when on the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` once the session has been scored.
    /// Returns `ValidationError::Unanswered` (wrapped) when answers are
    /// required and the current question has none; the cursor does not move.
    pub fn advance(&mut self) -> Result<Step, SessionError> {
        self.ensure_active()?;
        if self.require_answer && self.answers[self.current].is_none() {
            return Err(ValidationError::Unanswered {
                index: self.current,
            }
            .into());
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            return Ok(Step::Moved {
                index: self.current,
            });
        }
        self.finish().map(Step::Finished)
    }

    /// Step back one question; stays put on the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` once the session has been scored.
    pub fn retreat(&mut self) -> Result<usize, SessionError> {
        self.ensure_active()?;
        self.current = self.current.saturating_sub(1);
        Ok(self.current)
    }

    /// Score the session and close it. Unanswered questions count as wrong.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` if the session was already scored.
    pub fn finish(&mut self) -> Result<ResultSet, SessionError> {
        self.ensure_active()?;
        self.finished = true;
        Ok(score_session(&self.questions, &self.answers))
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.finished {
            return Err(SessionError::Finished);
        }
        Ok(())
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("answered", &self.answered_count())
            .field("current", &self.current)
            .field("require_answer", &self.require_answer)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::TestBuilder;
    use crate::model::SubjectCatalog;

    fn session(subjects: &[&str], require_answer: bool) -> QuizSession {
        let catalog = SubjectCatalog::builtin().unwrap();
        TestBuilder::new(&catalog)
            .with_require_answer(require_answer)
            .custom(subjects)
            .unwrap()
    }

    fn answer_all(session: &mut QuizSession, choices: &[usize]) -> ResultSet {
        for (i, &choice) in choices.iter().enumerate() {
            session
                .select_answer(Choice::from_index(choice).unwrap())
                .unwrap();
            match session.advance().unwrap() {
                Step::Moved { index } => assert_eq!(index, i + 1),
                Step::Finished(results) => return results,
            }
        }
        panic!("session did not finish");
    }

    #[test]
    fn new_session_has_all_answers_unset() {
        let session = session(&["Mathematics", "Physics"], true);
        assert_eq!(session.len(), 10);
        assert_eq!(session.answers().len(), session.questions().len());
        assert!(session.answers().iter().all(Option::is_none));
        assert_eq!(session.current_index(), 0);
        assert!(session.is_first());
    }

    #[test]
    fn mathematics_scenario_scores_full_marks() {
        let mut session = session(&["Mathematics"], true);
        let results = answer_all(&mut session, &[1, 1, 0, 0, 1]);

        assert_eq!(results.len(), 1);
        let score = &results.scores()[0];
        assert_eq!(score.subject, "Mathematics");
        assert_eq!(score.correct_count, 5);
        assert_eq!(score.total_count, 5);
        assert_eq!(score.percentage, 100);
        assert_eq!(results.strongest().unwrap().subject, "Mathematics");
        assert!(session.is_finished());
    }

    #[test]
    fn all_wrong_scores_zero_everywhere() {
        let mut session = session(&["Mathematics", "Physics"], true);
        let wrong: Vec<usize> = session
            .questions()
            .iter()
            .map(|q| (q.correct().index() + 1) % 4)
            .collect();
        let results = answer_all(&mut session, &wrong);
        assert!(results.scores().iter().all(|s| s.percentage == 0));
    }

    #[test]
    fn select_answer_overwrites_previous_choice() {
        let mut session = session(&["Physics"], true);
        session.select_answer(Choice::A).unwrap();
        session.select_answer(Choice::C).unwrap();
        session.select_answer(Choice::C).unwrap();
        assert_eq!(session.current_answer(), Some(Choice::C));
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn advance_requires_answer_when_enforced() {
        let mut session = session(&["Physics"], true);
        let err = session.advance().unwrap_err();
        assert_eq!(
            err,
            SessionError::Validation(ValidationError::Unanswered { index: 0 })
        );
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn advance_skips_unanswered_when_not_enforced() {
        let mut session = session(&["Physics"], false);
        for _ in 0..4 {
            assert!(matches!(session.advance().unwrap(), Step::Moved { .. }));
        }
        assert!(session.is_last());
        let Step::Finished(results) = session.advance().unwrap() else {
            panic!("expected finish");
        };
        assert_eq!(results.scores()[0].correct_count, 0);
        assert_eq!(results.scores()[0].total_count, 5);
    }

    #[test]
    fn retreat_is_floored_at_first_question() {
        let mut session = session(&["Chemistry"], false);
        assert_eq!(session.retreat().unwrap(), 0);
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(session.retreat().unwrap(), 1);
        assert_eq!(session.retreat().unwrap(), 0);
        assert_eq!(session.retreat().unwrap(), 0);
    }

    #[test]
    fn answers_survive_navigation() {
        let mut session = session(&["Biology"], true);
        session.select_answer(Choice::B).unwrap();
        session.advance().unwrap();
        session.select_answer(Choice::D).unwrap();
        session.retreat().unwrap();
        assert_eq!(session.current_answer(), Some(Choice::B));
    }

    #[test]
    fn finished_session_rejects_further_actions() {
        let mut session = session(&["Biology"], false);
        session.finish().unwrap();
        assert_eq!(session.select_answer(Choice::A), Err(SessionError::Finished));
        assert_eq!(session.advance(), Err(SessionError::Finished));
        assert_eq!(session.retreat(), Err(SessionError::Finished));
        assert_eq!(session.finish(), Err(SessionError::Finished));
    }

    #[test]
    fn progress_reports_position_fraction() {
        let mut session = session(&["Mathematics"], false);
        let progress = session.progress();
        assert_eq!(progress.position, 1);
        assert_eq!(progress.total, 5);
        assert!((progress.fraction() - 0.2).abs() < f64::EPSILON);

        session.select_answer(Choice::A).unwrap();
        session.advance().unwrap();
        let progress = session.progress();
        assert_eq!(progress.position, 2);
        assert_eq!(progress.answered, 1);
    }

    #[test]
    fn tie_goes_to_subject_seen_first() {
        let mut session = session(&["Physics", "Mathematics"], true);
        let correct: Vec<usize> = session
            .questions()
            .iter()
            .map(|q| q.correct().index())
            .collect();
        let results = answer_all(&mut session, &correct);
        assert_eq!(results.scores()[0].percentage, 100);
        assert_eq!(results.scores()[1].percentage, 100);
        assert_eq!(results.strongest().unwrap().subject, "Physics");
    }
}
