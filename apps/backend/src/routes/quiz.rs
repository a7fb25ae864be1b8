//! Quiz endpoints

use axum::{extract::State, Extension, Json};
use chrono::{Local, Utc};
use lingo_core::{daily_questions, study_day_index, DAILY_QUIZ_SIZE};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::progress::{check_consistency, record_completion};
use crate::AppState;

/// GET /api/quiz/questions
/// Returns today's questions in the caller's language
pub async fn questions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<QuestionsResponse>> {
    let user = state
        .db
        .get_user(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let questions = daily_questions(user.language(), &mut rand::thread_rng(), DAILY_QUIZ_SIZE);

    Ok(Json(QuestionsResponse { questions }))
}

/// POST /api/quiz/complete
/// Applies a finished quiz to the caller's progress
pub async fn complete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<QuizCompletion>,
) -> Result<Json<CompleteQuizResponse>> {
    check_consistency(&payload)?;

    let user = state
        .db
        .get_user(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let today_index = study_day_index(&Local::now(), state.config.daily_reset_hour);

    let outcome = record_completion(
        &state.db,
        &state.engine,
        user.id,
        user.language(),
        &payload,
        today_index,
        Utc::now(),
    )
    .await?;

    tracing::info!(
        "Quiz completed by {}: +{} coins, streak {}, {} quizzes total",
        user.id,
        outcome.update.summary.coins_earned,
        outcome.update.summary.streak,
        outcome.row.total_quizzes_completed
    );

    Ok(Json(CompleteQuizResponse {
        message: "Quiz completed successfully".to_string(),
        summary: outcome.update.summary,
    }))
}
