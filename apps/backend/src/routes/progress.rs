//! Progress endpoint

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/user/progress
/// Returns the caller's progress, creating a default record on first access
pub async fn get_progress(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ProgressResponse>> {
    if state.db.get_user(auth.user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let row = state.db.get_or_create_progress(auth.user_id).await?;
    let record = row.to_core_record();

    Ok(Json(ProgressResponse {
        progress_percent: lingo_core::progress_percent(&record),
        record,
        total_quizzes_completed: row.total_quizzes_completed,
        last_quiz_at: row.last_quiz_at,
    }))
}
