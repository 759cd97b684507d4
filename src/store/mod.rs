//! Application state store
//!
//! `AppStore` owns every canonical collection (words, groups, todos, streak,
//! wallet, settings, daily activity, the active test session) and exposes
//! each mutation as a single synchronous operation that computes the full
//! next state before committing. It composes the SRS engine, the reward
//! tables, and the quiz generator; nothing else mutates the collections.
//!
//! Construct one store at application start and pass it by reference; there
//! is no global instance.

pub mod models;

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::quiz::{self, OverrideTable, TestSession};
use crate::rewards::{self, BadgeStats};
use crate::srs::{self, ReviewRating};
use crate::storage::SnapshotStore;
use self::models::{
    DailyActivity, Group, PersistedSnapshot, SeedData, Settings, Streak, ThemeMode, Todo, Wallet,
    Word, WordStats, DEFAULT_DAILY_GOAL, MAX_DAILY_GOAL, MIN_DAILY_GOAL,
};

/// Validation failures surfaced to the UI. Unknown-identity lookups are not
/// errors; those operations are silent no-ops.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Set name is required.")]
    NameRequired,

    #[error("Set number must be a positive number.")]
    InvalidGroupId,

    #[error("Set {0} already exists.")]
    GroupExists(u32),

    #[error("Set {0} not found.")]
    GroupNotFound(u32),

    #[error("Word is required.")]
    WordRequired,

    #[error("Sentence is required (needed for tests).")]
    SentenceRequired,

    #[error("Duplicate word \u{201c}{word}\u{201d} already exists in Set {group_id}.")]
    DuplicateWord { word: String, group_id: u32 },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Derived id lists, cached by state version (plus query date) so repeated
/// reads between mutations return identical results without rescanning.
#[derive(Default)]
struct DerivedCache {
    due: Option<(u64, NaiveDate, Vec<String>)>,
    new: Option<(u64, Vec<String>)>,
}

pub struct AppStore {
    has_hydrated: bool,
    is_bootstrapped: bool,

    groups: Vec<Group>,
    words_by_id: HashMap<String, Word>,
    todos: Vec<Todo>,

    activity_by_date: BTreeMap<NaiveDate, DailyActivity>,
    streak: Streak,
    wallet: Wallet,
    settings: Settings,

    /// Never persisted; discarded on restart.
    active_session: Option<TestSession>,

    overrides: OverrideTable,

    /// Monotonic state version, bumped on every persisted-state mutation.
    version: u64,
    derived: RefCell<DerivedCache>,

    sink: Option<Box<dyn SnapshotStore>>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStore {
    /// An empty in-memory store with no persistence collaborator.
    pub fn new() -> Self {
        Self {
            has_hydrated: true,
            is_bootstrapped: false,
            groups: Vec::new(),
            words_by_id: HashMap::new(),
            todos: Vec::new(),
            activity_by_date: BTreeMap::new(),
            streak: Streak::default(),
            wallet: Wallet::default(),
            settings: Settings::default(),
            active_session: None,
            overrides: OverrideTable::builtin(),
            version: 0,
            derived: RefCell::new(DerivedCache::default()),
            sink: None,
        }
    }

    /// Load from a snapshot store; a failed load is logged and the app
    /// proceeds with a fresh default state.
    pub fn with_store(sink: Box<dyn SnapshotStore>) -> Self {
        let mut store = Self::new();
        match sink.load() {
            Ok(Some(snapshot)) => store.hydrate(snapshot),
            Ok(None) => {}
            Err(err) => {
                log::warn!("failed to load persisted snapshot, starting fresh: {}", err);
            }
        }
        store.sink = Some(sink);
        store.has_hydrated = true;
        store
    }

    /// Replace persisted state from a snapshot (startup hydration).
    pub fn hydrate(&mut self, snapshot: PersistedSnapshot) {
        self.is_bootstrapped = snapshot.is_bootstrapped;
        self.groups = snapshot.groups;
        self.words_by_id = snapshot.words_by_id;
        self.todos = snapshot.todos;
        self.activity_by_date = snapshot.activity_by_date;
        self.streak = snapshot.streak;
        self.wallet = snapshot.wallet;
        self.settings = snapshot.settings;
        self.version += 1;
    }

    /// The serializable view handed to the persistence collaborator. The
    /// active test session and the hydrated flag are excluded.
    pub fn snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            is_bootstrapped: self.is_bootstrapped,
            groups: self.groups.clone(),
            words_by_id: self.words_by_id.clone(),
            todos: self.todos.clone(),
            activity_by_date: self.activity_by_date.clone(),
            streak: self.streak,
            wallet: self.wallet,
            settings: self.settings,
        }
    }

    /// Swap the question override table (defaults to the built-in one).
    pub fn set_override_table(&mut self, overrides: OverrideTable) {
        self.overrides = overrides;
    }

    // Bump the state version and hand the new snapshot to the save hook.
    // Fire-and-forget: a failed save is logged, never surfaced.
    fn touch(&mut self) {
        self.version += 1;
        if let Some(sink) = &self.sink {
            if let Err(err) = sink.save(&self.snapshot()) {
                log::warn!("failed to save snapshot: {}", err);
            }
        }
    }

    // ==================== Read access ====================

    pub fn has_hydrated(&self) -> bool {
        self.has_hydrated
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.is_bootstrapped
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, group_id: u32) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn word(&self, word_id: &str) -> Option<&Word> {
        self.words_by_id.get(word_id)
    }

    pub fn words_by_id(&self) -> &HashMap<String, Word> {
        &self.words_by_id
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn streak(&self) -> Streak {
        self.streak
    }

    pub fn wallet(&self) -> Wallet {
        self.wallet
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn active_session(&self) -> Option<&TestSession> {
        self.active_session.as_ref()
    }

    /// Aggregate stats for badge predicates.
    pub fn badge_stats(&self) -> BadgeStats {
        BadgeStats {
            best_streak: self.streak.best_streak,
            total_reviewed: self.wallet.total_reviewed,
            coins: self.wallet.coins,
        }
    }

    // ==================== Derived views ====================

    /// Today's activity entry (zeroed if nothing was reviewed yet).
    pub fn today_activity(&self, today: NaiveDate) -> DailyActivity {
        self.activity_by_date.get(&today).copied().unwrap_or_default()
    }

    pub fn activity_by_date(&self) -> &BTreeMap<NaiveDate, DailyActivity> {
        &self.activity_by_date
    }

    /// Ids of non-new words due on or before `today`, ordered by due date
    /// then headword.
    pub fn due_word_ids(&self, today: NaiveDate) -> Vec<String> {
        if let Some((version, date, ids)) = &self.derived.borrow().due {
            if *version == self.version && *date == today {
                return ids.clone();
            }
        }

        let mut due: Vec<&Word> = self
            .words_by_id
            .values()
            .filter(|w| !w.srs.is_new && w.srs.due_date <= today)
            .collect();
        due.sort_by(|a, b| {
            a.srs
                .due_date
                .cmp(&b.srs.due_date)
                .then_with(|| a.word.cmp(&b.word))
        });
        let ids: Vec<String> = due.into_iter().map(|w| w.id.clone()).collect();

        self.derived.borrow_mut().due = Some((self.version, today, ids.clone()));
        ids
    }

    /// Ids of words never reviewed, ordered by id for stable output.
    pub fn new_word_ids(&self) -> Vec<String> {
        if let Some((version, ids)) = &self.derived.borrow().new {
            if *version == self.version {
                return ids.clone();
            }
        }

        let mut ids: Vec<String> = self
            .words_by_id
            .values()
            .filter(|w| w.srs.is_new)
            .map(|w| w.id.clone())
            .collect();
        ids.sort();

        self.derived.borrow_mut().new = Some((self.version, ids.clone()));
        ids
    }

    // ==================== Bootstrap ====================

    /// Idempotent seed reconciliation.
    ///
    /// First run loads everything. Later runs add only seed groups whose id
    /// is not present yet, skipping word ids that already materialized (a
    /// partial prior import leaves those behind). Existing group ids are
    /// never duplicated. Seed headwords are taken as-is; cross-group
    /// duplicate checking is the seed curator's job, not bootstrap's.
    pub fn bootstrap_from_seed(&mut self, seed: &SeedData, today: NaiveDate) {
        if !self.words_by_id.is_empty() {
            let missing: Vec<_> = seed
                .groups
                .iter()
                .filter(|g| self.group(g.id).is_none())
                .collect();

            if missing.is_empty() {
                if !self.is_bootstrapped {
                    self.is_bootstrapped = true;
                    self.touch();
                }
                return;
            }

            for group in missing {
                let mut word_ids = Vec::new();
                for seed_word in &group.words {
                    let word_id = Word::seed_id(group.id, seed_word.id);
                    if self.words_by_id.contains_key(&word_id) {
                        continue;
                    }
                    word_ids.push(word_id.clone());
                    self.words_by_id
                        .insert(word_id, Word::from_seed(group, seed_word, today));
                }
                self.groups.push(Group {
                    id: group.id,
                    name: group.name.clone(),
                    word_ids,
                });
            }
            self.groups.sort_by_key(|g| g.id);
            self.is_bootstrapped = true;
            log::info!("bootstrap merged missing seed groups");
            self.touch();
            return;
        }

        for group in &seed.groups {
            let mut word_ids = Vec::new();
            for seed_word in &group.words {
                let word_id = Word::seed_id(group.id, seed_word.id);
                word_ids.push(word_id.clone());
                self.words_by_id
                    .insert(word_id, Word::from_seed(group, seed_word, today));
            }
            self.groups.push(Group {
                id: group.id,
                name: group.name.clone(),
                word_ids,
            });
        }
        self.is_bootstrapped = true;
        log::info!(
            "bootstrap loaded {} groups, {} words",
            self.groups.len(),
            self.words_by_id.len()
        );
        self.touch();
    }

    // ==================== Reviews ====================

    /// Record one review: run the scheduler, pay out rewards, bump today's
    /// activity, and advance the streak if the daily goal was just hit.
    /// No-op if the word id is unknown.
    pub fn record_review(&mut self, word_id: &str, rating: ReviewRating, today: NaiveDate) {
        let Some(word) = self.words_by_id.get_mut(word_id) else {
            return;
        };

        word.srs = srs::apply_review(&word.srs, rating, today);
        word.stats = WordStats {
            times_reviewed: word.stats.times_reviewed + 1,
            last_reviewed_at: Some(today),
        };

        self.wallet.coins += rewards::coin_reward(rating) as u64;
        self.wallet.xp += rewards::xp_reward(rating) as u64;
        self.wallet.total_reviewed += 1;

        let previous = self.activity_by_date.get(&today).copied().unwrap_or_default();
        let reviewed_count = previous.reviewed_count + 1;
        // The streak transition fires at most once per day: only on the
        // review that first crosses the goal threshold.
        let hit_goal_now = !previous.did_hit_goal && reviewed_count >= self.settings.daily_goal;

        self.activity_by_date.insert(
            today,
            DailyActivity {
                reviewed_count,
                did_hit_goal: previous.did_hit_goal || hit_goal_now,
            },
        );

        if hit_goal_now {
            self.streak = match self.streak.last_goal_hit {
                Some(last) if last == today => self.streak,
                Some(last) if crate::dates::is_yesterday(last, today) => {
                    let current = self.streak.current_streak + 1;
                    Streak {
                        current_streak: current,
                        best_streak: self.streak.best_streak.max(current),
                        last_goal_hit: Some(today),
                    }
                }
                // No prior hit, or a gap of 2+ days: the streak restarts at 1.
                _ => Streak {
                    current_streak: 1,
                    best_streak: self.streak.best_streak.max(1),
                    last_goal_hit: Some(today),
                },
            };
        }

        self.touch();
    }

    /// Flip the starred flag. No-op if the word id is unknown.
    pub fn toggle_star(&mut self, word_id: &str) {
        let Some(word) = self.words_by_id.get_mut(word_id) else {
            return;
        };
        word.is_starred = !word.is_starred;
        self.touch();
    }

    // ==================== Groups & words ====================

    /// Create a word set. With no preferred id, the smallest unused positive
    /// integer is assigned. Groups stay sorted by id.
    pub fn create_group(&mut self, name: &str, preferred_id: Option<u32>) -> Result<u32> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::NameRequired);
        }

        let group_id = match preferred_id {
            Some(0) => return Err(StoreError::InvalidGroupId),
            Some(id) => {
                if self.group(id).is_some() {
                    return Err(StoreError::GroupExists(id));
                }
                id
            }
            None => {
                let mut id = 1;
                while self.group(id).is_some() {
                    id += 1;
                }
                id
            }
        };

        self.groups.push(Group {
            id: group_id,
            name: name.to_string(),
            word_ids: Vec::new(),
        });
        self.groups.sort_by_key(|g| g.id);
        self.touch();
        Ok(group_id)
    }

    /// Add a word to an existing set. Headwords are unique case-insensitively
    /// across the whole corpus; the error names the set holding the original.
    /// New words are prepended (most-recent-first) and scheduled as new.
    pub fn add_word_to_group(
        &mut self,
        group_id: u32,
        word: &str,
        synonym: &str,
        sentence: &str,
        today: NaiveDate,
    ) -> Result<String> {
        let word = word.trim();
        let synonym = synonym.trim();
        let sentence = sentence.trim();

        if word.is_empty() {
            return Err(StoreError::WordRequired);
        }
        if sentence.is_empty() {
            return Err(StoreError::SentenceRequired);
        }

        let group_name = self
            .group(group_id)
            .map(|g| g.name.clone())
            .ok_or(StoreError::GroupNotFound(group_id))?;

        let key = word.to_lowercase();
        if let Some(existing) = self
            .words_by_id
            .values()
            .find(|w| w.word.trim().to_lowercase() == key)
        {
            return Err(StoreError::DuplicateWord {
                word: word.to_string(),
                group_id: existing.group_id,
            });
        }

        let word_id = format!("{}-u-{}", group_id, Uuid::new_v4());
        self.words_by_id.insert(
            word_id.clone(),
            Word {
                id: word_id.clone(),
                group_id,
                group_name,
                word: word.to_string(),
                synonym: synonym.to_string(),
                sentence: sentence.to_string(),
                is_starred: false,
                srs: srs::new_state(today),
                stats: WordStats::default(),
            },
        );
        if let Some(group) = self.groups.iter_mut().find(|g| g.id == group_id) {
            group.word_ids.insert(0, word_id.clone());
        }
        self.touch();
        Ok(word_id)
    }

    // ==================== Todos ====================

    /// Add a todo. Blank titles are rejected silently; the due date defaults
    /// to today.
    pub fn add_todo(&mut self, title: &str, due_date: Option<NaiveDate>, today: NaiveDate) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }
        self.todos.insert(
            0,
            Todo {
                id: Uuid::new_v4(),
                title: title.to_string(),
                due_date: due_date.unwrap_or(today),
                is_completed: false,
                created_at: today,
            },
        );
        self.touch();
    }

    pub fn toggle_todo_completion(&mut self, todo_id: Uuid) {
        let Some(todo) = self.todos.iter_mut().find(|t| t.id == todo_id) else {
            return;
        };
        todo.is_completed = !todo.is_completed;
        self.touch();
    }

    pub fn delete_todo(&mut self, todo_id: Uuid) {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != todo_id);
        if self.todos.len() != before {
            self.touch();
        }
    }

    // ==================== Settings ====================

    /// Set the daily goal, clamped to [5, 80]. Non-finite input falls back
    /// to the default of 20.
    pub fn set_daily_goal(&mut self, goal: f64) {
        self.settings.daily_goal = if goal.is_finite() {
            (goal.round() as i64).clamp(MIN_DAILY_GOAL as i64, MAX_DAILY_GOAL as i64) as u32
        } else {
            DEFAULT_DAILY_GOAL
        };
        self.touch();
    }

    pub fn set_theme_mode(&mut self, theme_mode: ThemeMode) {
        self.settings.theme_mode = theme_mode;
        self.touch();
    }

    // ==================== Test sessions ====================

    /// Start a test over a set, using every other corpus headword as the
    /// distractor pool. A set with no resolvable words leaves the session
    /// absent rather than creating an empty one. No-op for an unknown set.
    pub fn start_test_for_group(&mut self, group_id: u32, question_count: usize, today: NaiveDate) {
        let Some(group) = self.group(group_id) else {
            return;
        };
        let group_name = group.name.clone();

        let words: Vec<Word> = group
            .word_ids
            .iter()
            .filter_map(|id| self.words_by_id.get(id).cloned())
            .collect();
        if words.is_empty() {
            // Stale persisted state can leave a set with dangling word ids.
            self.active_session = None;
            return;
        }

        let mut pool: Vec<&Word> = self.words_by_id.values().collect();
        pool.sort_by(|a, b| a.id.cmp(&b.id));
        let global_pool: Vec<String> = pool.into_iter().map(|w| w.word.clone()).collect();

        self.active_session = Some(quiz::generate_session(
            group_id,
            &group_name,
            &words,
            question_count,
            &global_pool,
            today,
            &self.overrides,
        ));
    }

    /// Record an answer for the current question. Locked once submitted.
    pub fn answer_current_question(&mut self, choice_index: usize) {
        let Some(session) = self.active_session.as_mut() else {
            return;
        };
        if session.is_submitted {
            return;
        }
        let Some(question_id) = session.current_question().map(|q| q.id) else {
            return;
        };
        session.answers_by_question.insert(question_id, choice_index);
    }

    /// Remove the stored answer for the current question. Locked once
    /// submitted.
    pub fn clear_current_answer(&mut self) {
        let Some(session) = self.active_session.as_mut() else {
            return;
        };
        if session.is_submitted {
            return;
        }
        let Some(question_id) = session.current_question().map(|q| q.id) else {
            return;
        };
        session.answers_by_question.remove(&question_id);
    }

    /// Jump to a question, clamped to valid bounds.
    pub fn go_to_question(&mut self, index: usize) {
        let Some(session) = self.active_session.as_mut() else {
            return;
        };
        session.current_index = index.min(session.questions.len().saturating_sub(1));
    }

    pub fn go_to_next_question(&mut self) {
        let Some(session) = self.active_session.as_mut() else {
            return;
        };
        session.current_index =
            (session.current_index + 1).min(session.questions.len().saturating_sub(1));
    }

    pub fn go_to_prev_question(&mut self) {
        let Some(session) = self.active_session.as_mut() else {
            return;
        };
        session.current_index = session.current_index.saturating_sub(1);
    }

    /// Flag the current question for revisiting; allowed before and after
    /// submission.
    pub fn toggle_mark_current_question(&mut self) {
        let Some(session) = self.active_session.as_mut() else {
            return;
        };
        let Some(question_id) = session.current_question().map(|q| q.id) else {
            return;
        };
        let marked = session
            .marked_by_question
            .get(&question_id)
            .copied()
            .unwrap_or(false);
        session.marked_by_question.insert(question_id, !marked);
    }

    /// Submit the active test, locking answers. Idempotent. Explanations
    /// start collapsed; the user expands them per question.
    pub fn submit_active_test(&mut self, today: NaiveDate) {
        let Some(session) = self.active_session.as_mut() else {
            return;
        };
        if session.is_submitted {
            return;
        }
        session.is_submitted = true;
        session.submitted_at = Some(today);
        session.explanation_visible_by_question.clear();
    }

    /// Toggle the explanation panel for the current question. Only
    /// meaningful after submission.
    pub fn toggle_current_explanation(&mut self) {
        let Some(session) = self.active_session.as_mut() else {
            return;
        };
        if !session.is_submitted {
            return;
        }
        let Some(question_id) = session.current_question().map(|q| q.id) else {
            return;
        };
        let visible = session
            .explanation_visible_by_question
            .get(&question_id)
            .copied()
            .unwrap_or(false);
        session
            .explanation_visible_by_question
            .insert(question_id, !visible);
    }

    /// Discard the active session.
    pub fn clear_test_session(&mut self) {
        self.active_session = None;
    }

    // ==================== Reset ====================

    /// Clear every collection and counter back to defaults in one step.
    pub fn reset_all(&mut self) {
        self.is_bootstrapped = false;
        self.groups.clear();
        self.words_by_id.clear();
        self.todos.clear();
        self.activity_by_date.clear();
        self.streak = Streak::default();
        self.wallet = Wallet::default();
        self.settings = Settings::default();
        self.active_session = None;
        log::info!("store reset to defaults");
        self.touch();
    }
}
