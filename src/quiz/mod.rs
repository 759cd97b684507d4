//! Generated multiple-choice vocabulary tests
//!
//! This module provides:
//! - Question/session models and scoring (`models`)
//! - The question and session generator (`generator`)
//! - The curated distractor pool (`pool`)
//! - Hand-authored question overrides (`overrides`)

pub mod generator;
pub mod models;
pub mod overrides;
pub mod pool;

pub use generator::{generate_question, generate_session};
pub use models::{ChoiceQuestion, TestScore, TestSession};
pub use overrides::{CustomQuestion, OverrideTable};
