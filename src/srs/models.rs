//! Scheduling state models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The four review buttons offered after recalling a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewRating {
    /// Failed recall.
    Again,
    /// Correct with serious difficulty.
    Hard,
    /// Correct after hesitation.
    Good,
    /// Perfect recall.
    Easy,
}

impl ReviewRating {
    /// Map the rating to an SM-2 quality score.
    ///
    /// The four buttons map onto the classic 0-5 scale as 1/3/4/5; qualities
    /// 0 and 2 are never emitted.
    pub fn quality(self) -> i32 {
        match self {
            ReviewRating::Again => 1,
            ReviewRating::Hard => 3,
            ReviewRating::Good => 4,
            ReviewRating::Easy => 5,
        }
    }
}

/// Per-word scheduling state, mutated only through [`apply_review`].
///
/// [`apply_review`]: super::algorithm::apply_review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrsState {
    /// Never reviewed; due immediately.
    pub is_new: bool,
    /// When the word next comes up for review.
    pub due_date: NaiveDate,
    /// Current interval in days.
    pub interval_days: u32,
    /// SM-2 ease factor, kept within [1.3, 3.0].
    pub ease_factor: f32,
    /// Consecutive successful recalls since the last lapse.
    pub repetition_count: u32,
}

impl SrsState {
    /// Whether the word is due on `today` (new words are always due).
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.is_new || self.due_date <= today
    }
}
