//! Test fixtures and factory functions for request bodies.

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use lingo_backend::models::{User, UserType};

/// Generate a unique email to avoid collisions between runs.
pub fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, &Uuid::new_v4().simple().to_string()[..12])
}

/// Create a register request body.
pub fn register_request(email: &str, language: &str, password: &str) -> serde_json::Value {
    json!({
        "fullName": "Test Learner",
        "email": email,
        "mobile": "5550100",
        "collegeEmail": null,
        "selectedLanguage": language,
        "password": password
    })
}

/// Create a login request body.
pub fn login_request(email: &str, password: &str, user_type: &str) -> serde_json::Value {
    json!({
        "email": email,
        "password": password,
        "userType": user_type
    })
}

/// Create a quiz completion body carrying only an efficiency.
pub fn completion(efficiency: i32) -> serde_json::Value {
    json!({ "efficiency": efficiency })
}

/// Create a full quiz completion body.
pub fn scored_completion(score: u32, total: u32, efficiency: i32) -> serde_json::Value {
    json!({
        "score": score,
        "totalQuestions": total,
        "efficiency": efficiency,
        "answers": (0..total).map(|i| i % 4).collect::<Vec<_>>()
    })
}

/// A user value that only exists in memory, for signing tokens.
pub fn detached_user(user_type: UserType) -> User {
    User {
        id: Uuid::new_v4(),
        full_name: "Detached".to_string(),
        email: unique_email("detached"),
        mobile: "0".to_string(),
        college_email: None,
        selected_language: "english".to_string(),
        password_hash: String::new(),
        user_type: user_type.as_str().to_string(),
        created_at: Utc::now(),
        last_login_at: Utc::now(),
    }
}
