//! Core types for the language-learning platform.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of weekday slots tracked per record (Monday = 0 .. Sunday = 6).
pub const DAYS_PER_WEEK: u8 = 7;

/// Distinct completed days needed to reach [`Level::Intermediate`].
pub const INTERMEDIATE_MIN_DAYS: usize = 7;

/// Distinct completed days needed to reach [`Level::Advanced`].
pub const ADVANCED_MIN_DAYS: usize = 21;

/// Language a learner studies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    French,
    Spanish,
    Hindi,
    English,
    Japanese,
    Chinese,
    German,
    Italian,
    Korean,
    Portuguese,
}

impl Language {
    pub const ALL: [Language; 10] = [
        Self::French,
        Self::Spanish,
        Self::Hindi,
        Self::English,
        Self::Japanese,
        Self::Chinese,
        Self::German,
        Self::Italian,
        Self::Korean,
        Self::Portuguese,
    ];

    /// Get the language name as stored and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::French => "french",
            Self::Spanish => "spanish",
            Self::Hindi => "hindi",
            Self::English => "english",
            Self::Japanese => "japanese",
            Self::Chinese => "chinese",
            Self::German => "german",
            Self::Italian => "italian",
            Self::Korean => "korean",
            Self::Portuguese => "portuguese",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        let lowered = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|l| l.as_str() == lowered)
    }
}

/// Account kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    User,
    Faculty,
}

impl Default for UserType {
    fn default() -> Self {
        Self::User
    }
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Faculty => "faculty",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "faculty" => Some(Self::Faculty),
            _ => None,
        }
    }
}

/// Learner level, derived from the number of distinct completed days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Default for Level {
    fn default() -> Self {
        Self::Beginner
    }
}

impl Level {
    /// Level for a given count of distinct completed days.
    pub fn from_completed_days(count: usize) -> Self {
        if count >= ADVANCED_MIN_DAYS {
            Self::Advanced
        } else if count >= INTERMEDIATE_MIN_DAYS {
            Self::Intermediate
        } else {
            Self::Beginner
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Beginner" => Some(Self::Beginner),
            "Intermediate" => Some(Self::Intermediate),
            "Advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Per-user learning progress.
///
/// `completed_days` accumulates over the whole lifetime of the record and is
/// never reset weekly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub user_id: Uuid,
    pub completed_days: BTreeSet<u8>,
    pub streak: u32,
    pub coins: u32,
    pub current_day: u8,
    pub level: Level,
    pub efficiency: u8,
}

impl ProgressRecord {
    /// Number of distinct weekday slots ever completed.
    pub fn completed_count(&self) -> usize {
        self.completed_days.len()
    }

    /// Whether a quiz was already completed on the given day index.
    pub fn has_completed(&self, day_index: u8) -> bool {
        self.completed_days.contains(&day_index)
    }
}

/// A finished quiz as reported by the client.
///
/// Only `efficiency` drives the progress transition; the remaining fields are
/// kept for history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizCompletion {
    pub efficiency: i32,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub answers: Vec<i32>,
}

impl QuizCompletion {
    /// Completion carrying only an efficiency value.
    pub fn with_efficiency(efficiency: i32) -> Self {
        Self {
            efficiency,
            score: 0,
            total_questions: 0,
            answers: Vec::new(),
        }
    }
}

/// Outcome of applying a completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSummary {
    pub coins_earned: u32,
    pub new_level: Level,
    pub total_coins: u32,
    pub streak: u32,
}

/// Question difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Multiple-choice quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: &'static str,
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub correct_answer: usize,
    pub difficulty: Difficulty,
}
