//! Faculty dashboard endpoint

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::FacultyStats;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/faculty/stats
pub async fn stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<FacultyStats>> {
    auth.require_faculty()?;

    let stats = state.db.get_faculty_stats().await?;

    Ok(Json(stats))
}
