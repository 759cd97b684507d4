//! Vocabulary study core
//!
//! The runtime library behind a vocabulary-learning app: word sets reviewed
//! on a spaced-repetition schedule, generated multiple-choice tests, and
//! streak/coin/XP tracking for daily consistency.
//!
//! Everything revolves around [`store::AppStore`], which owns the canonical
//! collections and exposes each mutation as one synchronous operation. The
//! UI layer (screens, speech, notifications) lives outside this crate and
//! talks to the store through those operations; persistence is behind the
//! [`storage::SnapshotStore`] trait and receives a snapshot after every
//! mutation, fire-and-forget.

pub mod dates;
pub mod import;
pub mod quiz;
pub mod rewards;
pub mod srs;
pub mod storage;
pub mod store;

pub use import::{import_into_store, parse_bulk_text, ImportSummary};
pub use quiz::{ChoiceQuestion, TestScore, TestSession};
pub use srs::{ReviewRating, SrsState};
pub use storage::{JsonFileStore, SnapshotStore};
pub use store::models::{SeedData, SeedGroup, SeedWord};
pub use store::{AppStore, StoreError};
