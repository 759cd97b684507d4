//! Bulk text import
//!
//! Parses free-text definitions of word sets into structured records and
//! applies them to the store through the regular create-group/add-word
//! operations. Parsing is line-oriented and forgiving: a bad line is
//! collected as an error, never a reason to abort the rest of the import.
//!
//! Format:
//! - a header line opens a set: `Set 4: Travel words`, `Set 4`, `4: Travel`,
//!   `4 - Travel`, `4. Travel`
//! - every other line is `word | synonym | sentence`, where the separator
//!   may also be a tab or a spaced dash/en-dash/em-dash; extra fields are
//!   folded into the sentence

use chrono::NaiveDate;
use regex::Regex;

use crate::store::{AppStore, StoreError};

/// One parsed word line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWord {
    pub word: String,
    pub synonym: String,
    pub sentence: String,
}

/// One parsed set with its word lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedGroup {
    pub id: u32,
    pub name: String,
    pub words: Vec<ParsedWord>,
}

/// A line that could not be used, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line: usize,
    pub message: String,
}

/// The outcome of parsing: whatever could be salvaged plus per-line errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedImport {
    pub groups: Vec<ParsedGroup>,
    pub errors: Vec<LineError>,
}

/// What actually happened when a parsed import was applied to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub groups_added: usize,
    pub words_added: usize,
    pub duplicates_skipped: usize,
    pub errors: Vec<String>,
}

fn parse_header(line: &str) -> Option<(u32, String)> {
    let set_re = Regex::new(r"(?i)^set\s+(\d+)\s*(?::\s*(.*))?$").expect("static pattern");
    let bare_re = Regex::new(r"^(\d+)\s*[:\-.]\s*(.+)$").expect("static pattern");

    let captures = set_re.captures(line).or_else(|| bare_re.captures(line))?;
    let id: u32 = captures.get(1)?.as_str().parse().ok()?;
    let name = captures
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("Set {}", id));
    Some((id, name))
}

fn split_word_line(line: &str) -> Vec<String> {
    let sep_re = Regex::new(r"\s*\|\s*|\t+|\s+[\-\u{2013}\u{2014}]\s+").expect("static pattern");
    sep_re
        .split(line)
        .map(|part| part.trim().to_string())
        .collect()
}

/// Parse the whole text. Blank lines are skipped; lines before the first
/// header, lines with fewer than three fields, and lines missing a word or
/// sentence are reported per line. Sets that end up with zero valid words
/// are dropped with an error rather than imported empty.
pub fn parse_bulk_text(text: &str) -> ParsedImport {
    let mut result = ParsedImport::default();
    let mut current: Option<ParsedGroup> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((id, name)) = parse_header(line) {
            if let Some(group) = current.take() {
                finish_group(group, &mut result);
            }
            current = Some(ParsedGroup {
                id,
                name,
                words: Vec::new(),
            });
            continue;
        }

        let Some(group) = current.as_mut() else {
            result.errors.push(LineError {
                line: line_no,
                message: "word line appears before any set header".to_string(),
            });
            continue;
        };

        let parts = split_word_line(line);
        if parts.len() < 3 {
            result.errors.push(LineError {
                line: line_no,
                message: "expected word | synonym | sentence".to_string(),
            });
            continue;
        }

        let word = parts[0].clone();
        let synonym = parts[1].clone();
        let sentence = parts[2..].join(" ").trim().to_string();

        if word.is_empty() || sentence.is_empty() {
            result.errors.push(LineError {
                line: line_no,
                message: "word and sentence are both required".to_string(),
            });
            continue;
        }

        group.words.push(ParsedWord {
            word,
            synonym,
            sentence,
        });
    }

    if let Some(group) = current.take() {
        finish_group(group, &mut result);
    }
    result
}

fn finish_group(group: ParsedGroup, result: &mut ParsedImport) {
    if group.words.is_empty() {
        result.errors.push(LineError {
            line: 0,
            message: format!("Set {} has no valid word lines and was dropped", group.id),
        });
    } else {
        result.groups.push(group);
    }
}

/// Parse `text` and apply it to the store.
///
/// Each parsed set goes through `create_group`; when the set id already
/// exists, words are added to the existing set instead. Each word goes
/// through `add_word_to_group`, so corpus-wide duplicate headwords are
/// skipped and counted rather than re-imported.
pub fn import_into_store(store: &mut AppStore, text: &str, today: NaiveDate) -> ImportSummary {
    let parsed = parse_bulk_text(text);
    let mut summary = ImportSummary::default();
    for err in &parsed.errors {
        if err.line == 0 {
            summary.errors.push(err.message.clone());
        } else {
            summary.errors.push(format!("line {}: {}", err.line, err.message));
        }
    }

    for group in &parsed.groups {
        match store.create_group(&group.name, Some(group.id)) {
            Ok(_) => summary.groups_added += 1,
            Err(StoreError::GroupExists(_)) => {
                // Re-import into the existing set; duplicates fall out below.
            }
            Err(err) => {
                summary.errors.push(err.to_string());
                continue;
            }
        }

        for word in &group.words {
            match store.add_word_to_group(group.id, &word.word, &word.synonym, &word.sentence, today)
            {
                Ok(_) => summary.words_added += 1,
                Err(StoreError::DuplicateWord { .. }) => summary.duplicates_skipped += 1,
                Err(err) => summary.errors.push(err.to_string()),
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_header_forms() {
        assert_eq!(parse_header("Set 4: Demo"), Some((4, "Demo".to_string())));
        assert_eq!(parse_header("set 4"), Some((4, "Set 4".to_string())));
        assert_eq!(parse_header("4: Demo"), Some((4, "Demo".to_string())));
        assert_eq!(parse_header("4 - Demo"), Some((4, "Demo".to_string())));
        assert_eq!(parse_header("4. Demo"), Some((4, "Demo".to_string())));
        assert_eq!(parse_header("abate|lessen|It abated."), None);
        assert_eq!(parse_header("4"), None);
    }

    #[test]
    fn test_parse_word_line_separators() {
        let text = "Set 1: Mixed\nabate|lessen|The storm abated.\nmorose\tgloomy\tHe was morose.\nsanguine – optimistic – She stayed sanguine.\nbanal — trite — A banal remark.";
        let parsed = parse_bulk_text(text);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.groups.len(), 1);
        let words = &parsed.groups[0].words;
        assert_eq!(words.len(), 4);
        assert_eq!(words[1].word, "morose");
        assert_eq!(words[2].synonym, "optimistic");
        assert_eq!(words[3].sentence, "A banal remark.");
    }

    #[test]
    fn test_extra_fields_fold_into_sentence() {
        let parsed = parse_bulk_text("Set 1\nabate|lessen|The storm|abated|overnight.");
        assert_eq!(
            parsed.groups[0].words[0].sentence,
            "The storm abated overnight."
        );
    }

    #[test]
    fn test_hyphenated_words_survive_dash_splitting() {
        // a dash without surrounding spaces is not a separator
        let parsed = parse_bulk_text("Set 1\nself-effacing|modest|A self-effacing reply.");
        assert_eq!(parsed.groups[0].words[0].word, "self-effacing");
    }

    #[test]
    fn test_bad_lines_are_collected_not_fatal() {
        let text = "orphan before header\nSet 2: Demo\ntoo|few\n|lessen|No word here.\nabate|lessen|It abated.";
        let parsed = parse_bulk_text(text);

        assert_eq!(parsed.groups.len(), 1);
        assert_eq!(parsed.groups[0].words.len(), 1);
        assert_eq!(parsed.errors.len(), 3);
        assert_eq!(parsed.errors[0].line, 1);
        assert_eq!(parsed.errors[1].line, 3);
        assert_eq!(parsed.errors[2].line, 4);
    }

    #[test]
    fn test_group_with_no_valid_words_is_dropped() {
        let parsed = parse_bulk_text("Set 3: Empty\nnot enough fields");
        assert!(parsed.groups.is_empty());
        assert_eq!(parsed.errors.len(), 2);
        assert!(parsed.errors[1].message.contains("Set 3"));
    }

    #[test]
    fn test_import_end_to_end_then_reimport_skips() {
        let mut store = AppStore::new();
        let today = d("2026-08-30");
        let text = "Set 4: Demo\nabate|lessen|It abated.";

        let summary = import_into_store(&mut store, text, today);
        assert_eq!(summary.groups_added, 1);
        assert_eq!(summary.words_added, 1);
        assert_eq!(summary.duplicates_skipped, 0);
        assert!(summary.errors.is_empty());

        let group = store.group(4).expect("imported group");
        assert_eq!(group.name, "Demo");
        assert_eq!(group.word_ids.len(), 1);

        let again = import_into_store(&mut store, text, today);
        assert_eq!(again.groups_added, 0);
        assert_eq!(again.words_added, 0);
        assert!(again.duplicates_skipped >= 1);
    }

    #[test]
    fn test_import_duplicate_across_sets_is_skipped() {
        let mut store = AppStore::new();
        let today = d("2026-08-30");
        import_into_store(&mut store, "Set 1: A\nabate|lessen|It abated.", today);

        let summary =
            import_into_store(&mut store, "Set 2: B\nAbate|reduce|Noise abates.", today);
        assert_eq!(summary.groups_added, 1);
        assert_eq!(summary.words_added, 0);
        assert_eq!(summary.duplicates_skipped, 1);
    }
}
