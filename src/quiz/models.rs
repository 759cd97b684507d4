//! Test session and question models

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Letters used when referring to choices in explanations.
pub const CHOICE_LABELS: [&str; 5] = ["A", "B", "C", "D", "E"];

/// A fill-in-the-blank question with (usually) five choices.
///
/// The generator produces fewer than five choices only when the distractor
/// pool cannot supply four qualifying words; that degenerate case is
/// tolerated rather than padded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceQuestion {
    pub id: Uuid,
    /// The word this question tests.
    pub word_id: String,
    /// Blanked sentence plus instruction line.
    pub stem: String,
    /// Unique case-insensitively.
    pub choices: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

/// An in-progress or submitted test over one word set.
///
/// Sessions are ephemeral: they are never written to the persisted snapshot,
/// so an app restart discards them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSession {
    pub id: Uuid,
    pub group_id: u32,
    pub group_name: String,
    pub started_at: NaiveDate,
    pub questions: Vec<ChoiceQuestion>,
    pub current_index: usize,
    /// Once submitted, answers are locked and explanations can be revealed.
    pub is_submitted: bool,
    pub submitted_at: Option<NaiveDate>,
    /// Selected choice index per question id.
    pub answers_by_question: HashMap<Uuid, usize>,
    /// Mark a question to revisit, regardless of correctness.
    pub marked_by_question: HashMap<Uuid, bool>,
    /// Whether the explanation panel is expanded per question id.
    pub explanation_visible_by_question: HashMap<Uuid, bool>,
}

impl TestSession {
    /// The question the cursor is on, if any.
    pub fn current_question(&self) -> Option<&ChoiceQuestion> {
        self.questions.get(self.current_index)
    }

    /// Count correct answers. An unanswered question is incorrect.
    pub fn score(&self) -> TestScore {
        let correct = self
            .questions
            .iter()
            .filter(|q| self.answers_by_question.get(&q.id) == Some(&q.correct_index))
            .count();
        TestScore {
            correct,
            total: self.questions.len(),
        }
    }

    /// Questions that were answered and answered wrong.
    pub fn wrong_questions(&self) -> Vec<&ChoiceQuestion> {
        self.questions
            .iter()
            .filter(|q| {
                matches!(self.answers_by_question.get(&q.id), Some(&chosen) if chosen != q.correct_index)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestScore {
    pub correct: usize,
    pub total: usize,
}

impl TestScore {
    /// Estimate a score on the 130-170 reporting scale.
    ///
    /// Real score equating is not linear; this is a simple ratio-based
    /// estimate for display purposes only.
    pub fn estimate_scaled(&self) -> u32 {
        if self.total == 0 {
            return 130;
        }
        let correct = self.correct.min(self.total);
        let ratio = correct as f64 / self.total as f64;
        let estimated = 130 + (40.0 * ratio).round() as u32;
        estimated.clamp(130, 170)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct_index: usize) -> ChoiceQuestion {
        ChoiceQuestion {
            id: Uuid::new_v4(),
            word_id: "1-1".to_string(),
            stem: "The storm ______________ overnight.\n\nSelect the answer.".to_string(),
            choices: vec![
                "abate".into(),
                "placate".into(),
                "deride".into(),
                "lament".into(),
                "eschew".into(),
            ],
            correct_index,
            explanation: String::new(),
        }
    }

    fn session(questions: Vec<ChoiceQuestion>) -> TestSession {
        TestSession {
            id: Uuid::new_v4(),
            group_id: 1,
            group_name: "Set 1".to_string(),
            started_at: NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
            questions,
            current_index: 0,
            is_submitted: false,
            submitted_at: None,
            answers_by_question: HashMap::new(),
            marked_by_question: HashMap::new(),
            explanation_visible_by_question: HashMap::new(),
        }
    }

    #[test]
    fn test_unanswered_counts_as_incorrect() {
        let s = session(vec![question(0), question(1)]);
        assert_eq!(s.score(), TestScore { correct: 0, total: 2 });
    }

    #[test]
    fn test_score_counts_matching_answers() {
        let mut s = session(vec![question(0), question(1), question(2)]);
        let ids: Vec<Uuid> = s.questions.iter().map(|q| q.id).collect();
        s.answers_by_question.insert(ids[0], 0); // right
        s.answers_by_question.insert(ids[1], 0); // wrong
        assert_eq!(s.score(), TestScore { correct: 1, total: 3 });
    }

    #[test]
    fn test_wrong_questions_excludes_unanswered() {
        let mut s = session(vec![question(0), question(1)]);
        let wrong_id = s.questions[1].id;
        s.answers_by_question.insert(wrong_id, 0);
        let wrong = s.wrong_questions();
        assert_eq!(wrong.len(), 1);
        assert_eq!(wrong[0].id, wrong_id);
    }

    #[test]
    fn test_estimate_scaled_bounds() {
        assert_eq!(TestScore { correct: 0, total: 0 }.estimate_scaled(), 130);
        assert_eq!(TestScore { correct: 0, total: 10 }.estimate_scaled(), 130);
        assert_eq!(TestScore { correct: 10, total: 10 }.estimate_scaled(), 170);
        assert_eq!(TestScore { correct: 5, total: 10 }.estimate_scaled(), 150);
    }
}
