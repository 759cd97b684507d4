//! Question and session generation
//!
//! Questions blank the headword out of its example sentence and surround it
//! with four distractors picked from the user's own corpus blended with the
//! curated pool. Distractor selection is lexical/morphological: candidates
//! are filtered to a similar suffix "shape", never by meaning.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::RegexBuilder;
use uuid::Uuid;

use super::models::{ChoiceQuestion, TestSession, CHOICE_LABELS};
use super::overrides::OverrideTable;
use super::pool::DISTRACTOR_POOL;
use crate::store::models::Word;

/// Tokens too common to count as context clues.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "to", "of", "in", "on", "at", "for", "with", "as", "by",
    "from", "that", "this", "it", "was", "were", "is", "are", "be", "been", "being", "only",
    "most", "more", "less", "very", "every", "any",
];

const IN_SENTENCE_BLANK: &str = "______________";
const APPENDED_BLANK: &str = "_____________";

/// Morphological "shape" of a word, inferred from its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordShape {
    Noun,
    Adjective,
    Verb,
    Other,
}

/// Suffix classification, checked noun-first so e.g. "-ment" words never
/// fall through to the verb "-en" bucket.
fn infer_word_shape(word: &str) -> WordShape {
    const NOUN_SUFFIXES: &[&str] = &[
        "ness", "tion", "sion", "ment", "ity", "ism", "ence", "ance", "hood", "ship",
    ];
    const ADJECTIVE_SUFFIXES: &[&str] = &[
        "ous", "ful", "less", "ive", "ic", "ical", "ary", "ate", "ant", "ent", "al",
    ];
    const VERB_SUFFIXES: &[&str] = &["ate", "ify", "ise", "ize", "en"];

    let w = word.to_lowercase();
    if NOUN_SUFFIXES.iter().any(|s| w.ends_with(s)) {
        WordShape::Noun
    } else if ADJECTIVE_SUFFIXES.iter().any(|s| w.ends_with(s)) {
        WordShape::Adjective
    } else if VERB_SUFFIXES.iter().any(|s| w.ends_with(s)) {
        WordShape::Verb
    } else {
        WordShape::Other
    }
}

/// Replace the first whole-word occurrence of `word` with a blank. If the
/// sentence does not contain the word literally (inconsistent data), append
/// a blank instead of failing.
fn blank_out_word(sentence: &str, word: &str) -> String {
    let pattern = format!(r"\b{}\b", regex::escape(word));
    let re = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .expect("escaped word pattern is always valid");

    if re.is_match(sentence) {
        re.replace(sentence, IN_SENTENCE_BLANK).into_owned()
    } else {
        format!("{} {}", sentence.trim_end(), APPENDED_BLANK)
    }
}

fn normalize_token(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == '-' || *c == '\'')
        .collect()
}

/// Up to `max_tokens` notable tokens from the sentence, first-occurrence
/// order, deduplicated. Tokens under 4 characters and stopwords are skipped.
fn extract_clue_tokens(sentence: &str, max_tokens: usize) -> Vec<String> {
    let mut unique = Vec::new();
    for raw in sentence.split_whitespace() {
        let token = normalize_token(raw);
        if token.chars().count() < 4 || STOPWORDS.contains(&token.as_str()) {
            continue;
        }
        if unique.contains(&token) {
            continue;
        }
        unique.push(token);
        if unique.len() >= max_tokens {
            break;
        }
    }
    unique
}

/// Pick up to `count` distractors of a similar shape from the pool.
///
/// Candidates shorter than 4 characters and the target itself are excluded;
/// "other"-shaped candidates are allowed as filler so obscure shapes don't
/// empty the pool. May return fewer than `count`.
fn pick_distractors<R: Rng>(
    rng: &mut R,
    correct_word: &str,
    pool: &[String],
    count: usize,
) -> Vec<String> {
    let target_shape = infer_word_shape(correct_word);
    let correct_lower = correct_word.to_lowercase();

    let mut candidates: Vec<&String> = pool
        .iter()
        .filter(|w| w.to_lowercase() != correct_lower)
        .filter(|w| w.chars().count() >= 4)
        .filter(|w| {
            if target_shape == WordShape::Other {
                return true;
            }
            let shape = infer_word_shape(w);
            shape == target_shape || shape == WordShape::Other
        })
        .collect();
    candidates.shuffle(rng);

    let mut picked = Vec::new();
    let mut seen = Vec::new();
    for w in candidates {
        let key = w.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        picked.push(w.clone());
        if picked.len() >= count {
            break;
        }
    }
    picked
}

fn build_explanation(
    choices: &[String],
    correct_index: usize,
    clue_tokens: &[String],
    synonym: &str,
) -> String {
    let answer_label = CHOICE_LABELS.get(correct_index).copied().unwrap_or("");
    let answer = &choices[correct_index];

    let mut parts = Vec::new();
    parts.push(format!("Answer: {}) {}", answer_label, answer));
    parts.push("Explanation:".to_string());

    if clue_tokens.len() >= 2 {
        parts.push(format!(
            "The keywords are \u{201c}{}\u{201d} and \u{201c}{}\u{201d}. These signal the sentence\u{2019}s tone/meaning.",
            clue_tokens[0], clue_tokens[1]
        ));
    } else {
        parts.push("The keywords are the strongest context clues around the blank.".to_string());
    }

    if synonym.is_empty() {
        parts.push("Therefore, pick the option that best preserves the sentence meaning.".to_string());
    } else {
        parts.push(format!(
            "Therefore, the blank should be filled by a word meaning closest to \u{201c}{}\u{201d}.",
            synonym
        ));
    }

    parts.push(format!(
        "({}) \u{201c}{}\u{201d} fits the context. The remaining options do not match the intended meaning or tone.",
        answer_label, answer
    ));

    parts.join("\n\n")
}

/// Generate one question for a word, preferring a hand-authored override.
pub fn generate_question(word: &Word, distractor_pool: &[String], overrides: &OverrideTable) -> ChoiceQuestion {
    generate_question_with_rng(&mut rand::thread_rng(), word, distractor_pool, overrides)
}

pub fn generate_question_with_rng<R: Rng>(
    rng: &mut R,
    word: &Word,
    distractor_pool: &[String],
    overrides: &OverrideTable,
) -> ChoiceQuestion {
    if let Some(custom) = overrides.get(&word.id) {
        return ChoiceQuestion {
            id: Uuid::new_v4(),
            word_id: word.id.clone(),
            stem: custom.stem.clone(),
            choices: custom.choices.clone(),
            correct_index: custom.correct_index,
            explanation: custom.explanation.clone(),
        };
    }

    let stem = format!(
        "{}\n\nSelect the answer.",
        blank_out_word(&word.sentence, &word.word)
    );

    // Blend the caller's pool with the curated list, deduplicated exactly.
    let mut combined: Vec<String> = Vec::with_capacity(distractor_pool.len() + DISTRACTOR_POOL.len());
    for w in distractor_pool
        .iter()
        .cloned()
        .chain(DISTRACTOR_POOL.iter().map(|w| w.to_string()))
    {
        if !combined.contains(&w) {
            combined.push(w);
        }
    }

    let distractors = pick_distractors(rng, &word.word, &combined, 4);

    let mut choices: Vec<String> = std::iter::once(word.word.clone())
        .chain(distractors)
        .collect();
    choices.shuffle(rng);
    choices.truncate(5);

    let word_lower = word.word.to_lowercase();
    let correct_index = choices
        .iter()
        .position(|c| c.to_lowercase() == word_lower)
        .unwrap_or(0);

    let clue_tokens = extract_clue_tokens(&word.sentence, 4);
    let explanation = build_explanation(&choices, correct_index, &clue_tokens, word.synonym.trim());

    ChoiceQuestion {
        id: Uuid::new_v4(),
        word_id: word.id.clone(),
        stem,
        choices,
        correct_index,
        explanation,
    }
}

/// Build a full session for a word set: shuffle the set, take up to
/// `question_count` words, and generate one question per word.
pub fn generate_session(
    group_id: u32,
    group_name: &str,
    words: &[Word],
    question_count: usize,
    global_pool: &[String],
    started_at: NaiveDate,
    overrides: &OverrideTable,
) -> TestSession {
    generate_session_with_rng(
        &mut rand::thread_rng(),
        group_id,
        group_name,
        words,
        question_count,
        global_pool,
        started_at,
        overrides,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn generate_session_with_rng<R: Rng>(
    rng: &mut R,
    group_id: u32,
    group_name: &str,
    words: &[Word],
    question_count: usize,
    global_pool: &[String],
    started_at: NaiveDate,
    overrides: &OverrideTable,
) -> TestSession {
    let mut shuffled: Vec<&Word> = words.iter().collect();
    shuffled.shuffle(rng);
    shuffled.truncate(question_count.min(words.len()));

    let questions = shuffled
        .iter()
        .map(|w| generate_question_with_rng(rng, w, global_pool, overrides))
        .collect();

    TestSession {
        id: Uuid::new_v4(),
        group_id,
        group_name: group_name.to_string(),
        started_at,
        questions,
        current_index: 0,
        is_submitted: false,
        submitted_at: None,
        answers_by_question: Default::default(),
        marked_by_question: Default::default(),
        explanation_visible_by_question: Default::default(),
    }
}
