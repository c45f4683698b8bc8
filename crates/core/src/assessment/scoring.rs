use std::collections::HashMap;

use crate::model::{Choice, Question, ResultSet, SubjectScore};

/// Group answers by subject and count correct ones.
///
/// Subjects appear in the order their first question appears. An answer
/// slot beyond the end of `answers` counts as unanswered.
#[must_use]
pub fn score_session(questions: &[Question], answers: &[Option<Choice>]) -> ResultSet {
    let mut order: Vec<&str> = Vec::new();
    let mut tallies: HashMap<&str, (u32, u32)> = HashMap::new();

    for (i, question) in questions.iter().enumerate() {
        let subject = question.subject();
        let tally = tallies.entry(subject).or_insert_with(|| {
            order.push(subject);
            (0, 0)
        });
        tally.1 += 1;
        if answers
            .get(i)
            .copied()
            .flatten()
            .is_some_and(|choice| question.is_correct(choice))
        {
            tally.0 += 1;
        }
    }

    let scores = order
        .into_iter()
        .map(|subject| {
            let (correct, total) = tallies.get(subject).copied().unwrap_or_default();
            SubjectScore::new(subject, correct, total)
        })
        .collect();
    ResultSet::new(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(subject: &str, correct: usize) -> Question {
        Question::new(
            subject,
            "Q",
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct,
        )
        .unwrap()
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let questions = vec![
            question("Physics", 0),
            question("Mathematics", 1),
            question("Physics", 2),
        ];
        let answers = vec![Some(Choice::A), Some(Choice::B), None];
        let results = score_session(&questions, &answers);

        let subjects: Vec<_> = results.scores().iter().map(|s| s.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Physics", "Mathematics"]);
        assert_eq!(results.scores()[0].correct_count, 1);
        assert_eq!(results.scores()[0].total_count, 2);
        assert_eq!(results.scores()[0].percentage, 50);
        assert_eq!(results.scores()[1].percentage, 100);
    }

    #[test]
    fn one_of_three_rounds_down_two_of_three_rounds_up() {
        let questions = vec![
            question("Art", 0),
            question("Art", 0),
            question("Art", 0),
            question("Music", 0),
            question("Music", 0),
            question("Music", 0),
        ];
        let answers = vec![
            Some(Choice::A),
            Some(Choice::B),
            Some(Choice::B),
            Some(Choice::A),
            Some(Choice::A),
            None,
        ];
        let results = score_session(&questions, &answers);
        assert_eq!(results.scores()[0].percentage, 33);
        assert_eq!(results.scores()[1].percentage, 67);
        assert_eq!(results.strongest().unwrap().subject, "Music");
    }
}
