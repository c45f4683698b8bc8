mod builder;
mod sampler;
mod scoring;
mod selection;
mod session;

pub use builder::{RANDOM_SUBJECT_COUNT, TestBuilder, TestMode};
pub use sampler::sample_without_replacement;
pub use scoring::score_session;
pub use selection::{MAX_SUBJECTS, SubjectSelection};
pub use session::{QuizProgress, QuizSession, SessionError, Step};
