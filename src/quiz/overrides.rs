//! Hand-authored question overrides
//!
//! A word can carry a hand-written question that the generator prefers over
//! auto-generation. Overrides are keyed by the app word id
//! (`"<groupId>-<seedWordId>"`) and must provide exactly five choices to be
//! considered well-formed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A hand-authored question body. The override's own correctness contract
/// holds as given; the correct choice need not equal the headword.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomQuestion {
    pub stem: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

impl CustomQuestion {
    /// Only overrides with exactly five choices are used.
    pub fn is_well_formed(&self) -> bool {
        self.choices.len() == 5 && self.correct_index < self.choices.len()
    }
}

/// Override table keyed by word id.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    by_word_id: HashMap<String, CustomQuestion>,
}

impl OverrideTable {
    pub fn new(by_word_id: HashMap<String, CustomQuestion>) -> Self {
        Self { by_word_id }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The well-formed override for a word, if any.
    pub fn get(&self, word_id: &str) -> Option<&CustomQuestion> {
        self.by_word_id
            .get(word_id)
            .filter(|q| q.is_well_formed())
    }

    pub fn insert(&mut self, word_id: impl Into<String>, question: CustomQuestion) {
        self.by_word_id.insert(word_id.into(), question);
    }

    /// The built-in overrides shipped with the app (seed set 1).
    pub fn builtin() -> Self {
        let mut table = Self::default();
        table.insert(
            "1-1",
            CustomQuestion {
                stem: "The marsh seemed to __________ with insects; even a brief walk left my clothes speckled with gnats.\n\nSelect the answer.".to_string(),
                choices: vec![
                    "abound".into(),
                    "languish".into(),
                    "diminish".into(),
                    "delineate".into(),
                    "placate".into(),
                ],
                correct_index: 0,
                explanation: "Answer: A) abound\n\nExplanation:\nThe sentence implies an overwhelming quantity of insects (\"speckled with gnats\"). \"Abound\" means to exist in great numbers or be plentiful. The other options describe weakening (languish/diminish), defining (delineate), or calming (placate), none of which fit abundance.".to_string(),
            },
        );
        table.insert(
            "1-2",
            CustomQuestion {
                stem: "The committee produced an __________ plan: it gestured toward reform but offered no concrete steps or clear definition.\n\nSelect the answer.".to_string(),
                choices: vec![
                    "amorphous".into(),
                    "sagacious".into(),
                    "perfunctory".into(),
                    "garrulous".into(),
                    "incisive".into(),
                ],
                correct_index: 0,
                explanation: "Answer: A) amorphous\n\nExplanation:\nThe clue is \"no concrete steps\" and \"no clear definition\". \"Amorphous\" means lacking a clear structure or form. The other choices suggest wisdom (sagacious), routine/half-hearted work (perfunctory), talkativeness (garrulous), or sharp analysis (incisive).".to_string(),
            },
        );
        table.insert(
            "1-3",
            CustomQuestion {
                stem: "Although the retreat promised comfort, its rules were surprisingly __________: no music, no desserts, and long hours of silent reflection.\n\nSelect the answer.".to_string(),
                choices: vec![
                    "austere".into(),
                    "opulent".into(),
                    "capricious".into(),
                    "improvised".into(),
                    "flippant".into(),
                ],
                correct_index: 0,
                explanation: "Answer: A) austere\n\nExplanation:\nThe details (\"no music, no desserts\") point to a strict, plain, self-denying environment. \"Austere\" means severely simple or strict. \"Opulent\" is the opposite, and the remaining options don't match the sense of severity.".to_string(),
            },
        );
        table.insert(
            "1-5",
            CustomQuestion {
                stem: "Her steady smile seemed to __________ her irritation; only the tightness in her voice hinted at how angry she was.\n\nSelect the answer.".to_string(),
                choices: vec![
                    "belie".into(),
                    "proclaim".into(),
                    "magnify".into(),
                    "vindicate".into(),
                    "catalog".into(),
                ],
                correct_index: 0,
                explanation: "Answer: A) belie\n\nExplanation:\n\"Belie\" means to contradict or mask. The smile made it appear she wasn't irritated, while the voice suggested the opposite. \"Proclaim\" and \"magnify\" would reveal or intensify irritation, not conceal it.".to_string(),
            },
        );
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_overrides_are_well_formed() {
        let table = OverrideTable::builtin();
        for id in ["1-1", "1-2", "1-3", "1-5"] {
            let q = table.get(id).expect(id);
            assert_eq!(q.choices.len(), 5);
            assert_eq!(q.correct_index, 0);
        }
    }

    #[test]
    fn test_malformed_override_is_ignored() {
        let mut table = OverrideTable::empty();
        table.insert(
            "9-1",
            CustomQuestion {
                stem: "x".into(),
                choices: vec!["a".into(), "b".into()],
                correct_index: 0,
                explanation: String::new(),
            },
        );
        assert!(table.get("9-1").is_none());
    }
}
