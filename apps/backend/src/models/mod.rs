//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from lingo-core
pub use lingo_core::types::{
    CompletionSummary, Language, Level, ProgressRecord, Question, QuizCompletion, UserType,
};

// === Database Entity Types ===

/// Registered account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub college_email: Option<String>,
    pub selected_language: String,
    pub password_hash: String,
    pub user_type: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

impl User {
    /// Study language; unknown values fall back to English.
    pub fn language(&self) -> Language {
        Language::from_str(&self.selected_language).unwrap_or(Language::English)
    }

    pub fn user_type(&self) -> UserType {
        UserType::from_str(&self.user_type).unwrap_or_default()
    }

    /// Convert to API user type (no password hash)
    pub fn to_api_user(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            selected_language: self.language(),
            user_type: self.user_type(),
        }
    }
}

/// Values for a new user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub college_email: Option<String>,
    pub selected_language: Language,
    pub password_hash: String,
    pub user_type: UserType,
}

/// Progress row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbProgress {
    pub user_id: Uuid,
    pub completed_days: Vec<i16>,
    pub streak: i32,
    pub coins: i32,
    pub current_day: i16,
    pub level: String,
    pub efficiency: i16,
    pub total_quizzes_completed: i32,
    pub last_quiz_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbProgress {
    /// Convert to lingo-core ProgressRecord
    pub fn to_core_record(&self) -> ProgressRecord {
        ProgressRecord {
            user_id: self.user_id,
            completed_days: self
                .completed_days
                .iter()
                .filter_map(|d| u8::try_from(*d).ok())
                .filter(|d| *d < lingo_core::types::DAYS_PER_WEEK)
                .collect(),
            streak: self.streak.max(0) as u32,
            coins: self.coins.max(0) as u32,
            current_day: self.current_day.clamp(0, 6) as u8,
            level: Level::from_str(&self.level).unwrap_or_default(),
            efficiency: self.efficiency.clamp(0, 100) as u8,
        }
    }
}

/// Columns written back after a progress update
#[derive(Debug, Clone)]
pub struct ProgressColumns {
    pub completed_days: Vec<i16>,
    pub streak: i32,
    pub coins: i32,
    pub current_day: i16,
    pub level: &'static str,
    pub efficiency: i16,
}

impl ProgressColumns {
    /// Create from lingo-core ProgressRecord
    pub fn from_core_record(record: &ProgressRecord) -> Self {
        Self {
            completed_days: record.completed_days.iter().map(|d| i16::from(*d)).collect(),
            streak: i32::try_from(record.streak).unwrap_or(i32::MAX),
            coins: i32::try_from(record.coins).unwrap_or(i32::MAX),
            current_day: i16::from(record.current_day),
            level: record.level.as_str(),
            efficiency: i16::from(record.efficiency),
        }
    }
}

/// Quiz history row
#[derive(Debug, Clone, FromRow)]
pub struct DbQuizAttempt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub language: String,
    pub score: i32,
    pub total_questions: i32,
    pub efficiency: i16,
    pub coins_earned: i32,
    pub day_of_week: i16,
    pub answers: serde_json::Value,
    pub completed_at: DateTime<Utc>,
}

impl DbQuizAttempt {
    /// Build a history row for a completion that has already been applied.
    pub fn from_completion(
        user_id: Uuid,
        language: Language,
        event: &QuizCompletion,
        summary: &CompletionSummary,
        day_of_week: u8,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            language: language.as_str().to_string(),
            score: i32::try_from(event.score).unwrap_or(i32::MAX),
            total_questions: i32::try_from(event.total_questions).unwrap_or(i32::MAX),
            efficiency: event.efficiency.clamp(0, 100) as i16,
            coins_earned: i32::try_from(summary.coins_earned).unwrap_or(i32::MAX),
            day_of_week: i16::from(day_of_week),
            answers: serde_json::Value::from(event.answers.clone()),
            completed_at,
        }
    }
}

// === API Request/Response Types ===

/// Generic message body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public user info
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub selected_language: Language,
    pub user_type: UserType,
}

/// POST /api/auth/register request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    #[serde(default)]
    pub college_email: Option<String>,
    pub selected_language: String,
    pub password: String,
}

/// POST /api/auth/login request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub user_type: UserType,
}

/// POST /api/auth/login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserInfo,
}

/// GET /api/user/progress response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    #[serde(flatten)]
    pub record: ProgressRecord,
    pub progress_percent: u8,
    pub total_quizzes_completed: i32,
    pub last_quiz_at: Option<DateTime<Utc>>,
}

/// GET /api/quiz/questions response
#[derive(Debug, Clone, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

/// POST /api/quiz/complete response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteQuizResponse {
    pub message: String,
    #[serde(flatten)]
    pub summary: CompletionSummary,
}

/// GET /api/faculty/stats response
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FacultyStats {
    pub total_students: i64,
    pub active_students: i64,
    pub total_quizzes: i64,
    pub average_score: i64,
}
