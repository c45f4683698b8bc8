use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("expected {OPTION_COUNT} options, got {len}")]
    WrongOptionCount { len: usize },

    #[error("option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct index {index} is out of range")]
    CorrectIndexOutOfRange { index: usize },
}

/// One of the four answer slots of a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    pub const ALL: [Choice; OPTION_COUNT] = [Choice::A, Choice::B, Choice::C, Choice::D];

    /// Maps a zero-based option index onto a choice.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Choice::A => 0,
            Choice::B => 1,
            Choice::C => 2,
            Choice::D => 3,
        }
    }

    /// Letter shown next to the option.
    #[must_use]
    pub fn label(self) -> char {
        match self {
            Choice::A => 'A',
            Choice::B => 'B',
            Choice::C => 'C',
            Choice::D => 'D',
        }
    }
}

impl TryFrom<usize> for Choice {
    type Error = QuestionError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(QuestionError::CorrectIndexOutOfRange { index })
    }
}

impl From<Choice> for usize {
    fn from(choice: Choice) -> Self {
        choice.index()
    }
}

/// A multiple-choice question tagged with the subject it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    subject: String,
    text: String,
    options: [String; OPTION_COUNT],
    correct: Choice,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text or any option is blank, if there
    /// are not exactly four options, or if `correct_index` is not in `0..4`.
    pub fn new(
        subject: impl Into<String>,
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }
        let len = options.len();
        let options: [String; OPTION_COUNT] = options
            .try_into()
            .map_err(|_| QuestionError::WrongOptionCount { len })?;
        let correct = Choice::try_from(correct_index)?;

        Ok(Self {
            subject: subject.into(),
            text,
            options,
            correct,
        })
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, choice: Choice) -> &str {
        &self.options[choice.index()]
    }

    #[must_use]
    pub fn correct(&self) -> Choice {
        self.correct
    }

    #[must_use]
    pub fn is_correct(&self, choice: Choice) -> bool {
        self.correct == choice
    }
}

/// Question as it appears in the bank asset, before it is tied to a subject.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl QuestionDraft {
    pub(crate) fn validate(self, subject: &str) -> Result<Question, QuestionError> {
        Question::new(subject, self.text, self.options, self.correct_index)
    }
}
