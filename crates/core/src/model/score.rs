use serde::{Deserialize, Serialize};

/// Per-subject outcome of a finished assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectScore {
    pub subject: String,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub total_count: u32,
    pub percentage: u32,
}

impl SubjectScore {
    /// Build a score, rounding the percentage half-up to the nearest integer.
    #[must_use]
    pub fn new(subject: impl Into<String>, correct_count: u32, total_count: u32) -> Self {
        Self {
            subject: subject.into(),
            correct_count,
            total_count,
            percentage: percentage(correct_count, total_count),
        }
    }
}

fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct.min(total));
    let total = u64::from(total);
    // floor(100 * c / t + 0.5) without floating point
    let rounded = (200 * correct + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(100)
}

/// Ordered per-subject scores of one assessment.
///
/// Order follows the first appearance of each subject in the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    scores: Vec<SubjectScore>,
}

impl ResultSet {
    #[must_use]
    pub fn new(scores: Vec<SubjectScore>) -> Self {
        Self { scores }
    }

    #[must_use]
    pub fn scores(&self) -> &[SubjectScore] {
        &self.scores
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Highest percentage; the earliest subject wins a tie.
    #[must_use]
    pub fn strongest(&self) -> Option<&SubjectScore> {
        self.scores.iter().fold(None, |best, current| match best {
            Some(b) if b.percentage >= current.percentage => Some(b),
            _ => Some(current),
        })
    }

    #[must_use]
    pub fn into_scores(self) -> Vec<SubjectScore> {
        self.scores
    }
}
