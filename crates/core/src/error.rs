use thiserror::Error;

/// Recoverable, user-facing failures. The operation that returns one leaves
/// all state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("no subjects selected")]
    NoSubjects,

    #[error("at most {max} subjects can be selected, got {got}")]
    TooManySubjects { max: usize, got: usize },

    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    #[error("selected subjects have no questions")]
    NoQuestions,

    #[error("question {} has not been answered", index + 1)]
    Unanswered { index: usize },

    #[error("no path selected")]
    EmptyPath,
}
