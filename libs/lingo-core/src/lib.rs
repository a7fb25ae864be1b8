//! Core library for the language-learning platform.
//!
//! Provides:
//! - The progress engine (streaks, coins, levels, weekday indexing)
//! - The built-in question bank
//! - Shared types (ProgressRecord, QuizCompletion, Level, Language, etc.)

pub mod error;
pub mod progress;
pub mod questions;
pub mod types;

pub use error::{ProgressError, Result};
pub use progress::{
    day_index_for, efficiency_for, init_default, progress_percent, study_day_index,
    ProgressEngine, ProgressUpdate, RewardRules,
};
pub use questions::{bank_for, daily_questions, DAILY_QUIZ_SIZE};
pub use types::{
    CompletionSummary, Difficulty, Language, Level, ProgressRecord, Question, QuizCompletion,
    UserType,
};
