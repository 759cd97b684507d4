//! Spaced repetition scheduling
//!
//! This module provides:
//! - The per-word scheduling state (`SrsState`)
//! - The four-button review rating scale (`ReviewRating`)
//! - The SM-2 derived transition function (`apply_review`)

pub mod algorithm;
pub mod models;

pub use algorithm::{apply_review, new_state};
pub use models::{ReviewRating, SrsState};
