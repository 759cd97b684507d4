//! Data models for the application state store

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::srs::{self, SrsState};

// ==================== Seed input ====================

/// One word inside a seed set. The id is small and scoped to its group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedWord {
    pub id: u32,
    pub word: String,
    pub synonym: String,
    pub sentence: String,
}

/// One seed set of words.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedGroup {
    pub id: u32,
    pub name: String,
    pub words: Vec<SeedWord>,
}

/// The structured seed document shipped with the app.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    pub groups: Vec<SeedGroup>,
}

// ==================== Entities ====================

/// Review statistics for a word.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordStats {
    #[serde(default)]
    pub times_reviewed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<NaiveDate>,
}

/// A learning unit: headword, gloss, and example sentence with SRS state.
///
/// The id is stable across reseeds: `"<groupId>-<seedWordId>"` for seeded
/// words, `"<groupId>-u-<uuid>"` for user-added ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: String,
    pub group_id: u32,
    pub group_name: String,
    pub word: String,
    pub synonym: String,
    pub sentence: String,
    #[serde(default)]
    pub is_starred: bool,
    pub srs: SrsState,
    #[serde(default)]
    pub stats: WordStats,
}

impl Word {
    /// Stable id for a seeded word.
    pub fn seed_id(group_id: u32, seed_word_id: u32) -> String {
        format!("{}-{}", group_id, seed_word_id)
    }

    pub fn from_seed(group: &SeedGroup, seed: &SeedWord, today: NaiveDate) -> Self {
        Self {
            id: Self::seed_id(group.id, seed.id),
            group_id: group.id,
            group_name: group.name.clone(),
            word: seed.word.clone(),
            synonym: seed.synonym.clone(),
            sentence: seed.sentence.clone(),
            is_starred: false,
            srs: srs::new_state(today),
            stats: WordStats::default(),
        }
    }
}

/// A word set. Member ids are most-recent-first for user-added words.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: u32,
    pub name: String,
    pub word_ids: Vec<String>,
}

/// A todo item, independent of the word/group lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub is_completed: bool,
    pub created_at: NaiveDate,
}

/// Per-day review activity. Historical days are immutable except for the
/// goal flag flipping false to true within the same day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    #[serde(default)]
    pub reviewed_count: u32,
    #[serde(default)]
    pub did_hit_goal: bool,
}

/// Daily-goal streak. `best_streak >= current_streak` always.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub best_streak: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_goal_hit: Option<NaiveDate>,
}

/// Coins, XP and the lifetime review counter. Monotonically non-decreasing
/// except on full reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    #[serde(default)]
    pub coins: u64,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub total_reviewed: u64,
}

/// Theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

pub const DEFAULT_DAILY_GOAL: u32 = 20;
pub const MIN_DAILY_GOAL: u32 = 5;
pub const MAX_DAILY_GOAL: u32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

fn default_daily_goal() -> u32 {
    DEFAULT_DAILY_GOAL
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_goal: DEFAULT_DAILY_GOAL,
            theme_mode: ThemeMode::System,
        }
    }
}

// ==================== Persisted view ====================

/// Exactly what gets handed to the persistence collaborator after each
/// mutation. The active test session and the hydrated flag are transient and
/// deliberately absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    #[serde(default)]
    pub is_bootstrapped: bool,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub words_by_id: HashMap<String, Word>,
    #[serde(default)]
    pub todos: Vec<Todo>,
    #[serde(default)]
    pub activity_by_date: BTreeMap<NaiveDate, DailyActivity>,
    #[serde(default)]
    pub streak: Streak,
    #[serde(default)]
    pub wallet: Wallet,
    #[serde(default)]
    pub settings: Settings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_word_id_format() {
        assert_eq!(Word::seed_id(3, 12), "3-12");
    }

    #[test]
    fn test_snapshot_roundtrip_with_missing_fields() {
        // Older snapshots may lack newer fields; defaults must fill in.
        let snapshot: PersistedSnapshot = serde_json::from_str("{}").unwrap();
        assert!(!snapshot.is_bootstrapped);
        assert_eq!(snapshot.settings.daily_goal, DEFAULT_DAILY_GOAL);
        assert_eq!(snapshot.settings.theme_mode, ThemeMode::System);
    }

    #[test]
    fn test_snapshot_serializes_dates_as_iso_keys() {
        let mut snapshot = PersistedSnapshot::default();
        snapshot.activity_by_date.insert(
            NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
            DailyActivity {
                reviewed_count: 3,
                did_hit_goal: false,
            },
        );
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"2026-08-30\""));
        assert!(json.contains("reviewedCount"));

        let back: PersistedSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.activity_by_date.len(), 1);
    }
}
