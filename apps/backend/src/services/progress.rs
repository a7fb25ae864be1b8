//! Quiz completion flow around the progress engine.
//!
//! The engine is pure; this module owns the load-apply-save sequence. It runs
//! in one transaction holding a row lock on the user's progress, so concurrent
//! completions for the same user are serialized instead of overwriting each
//! other.

use chrono::{DateTime, Utc};
use lingo_core::{efficiency_for, ProgressEngine, ProgressUpdate};

use crate::db::{self, Database};
use crate::error::{ApiError, Result};
use crate::models::{DbProgress, DbQuizAttempt, Language, ProgressColumns, QuizCompletion};

/// Saved outcome of a completion.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub update: ProgressUpdate,
    pub row: DbProgress,
}

/// Reject reported scores that contradict each other.
///
/// An event with no question count carries only an efficiency and is accepted
/// as is.
pub fn check_consistency(event: &QuizCompletion) -> Result<()> {
    if event.total_questions == 0 {
        return Ok(());
    }
    if event.score > event.total_questions {
        return Err(ApiError::BadRequest(format!(
            "score {} exceeds totalQuestions {}",
            event.score, event.total_questions
        )));
    }
    let expected = efficiency_for(event.score, event.total_questions);
    if i32::from(expected) != event.efficiency {
        return Err(ApiError::BadRequest(format!(
            "efficiency {} does not match score {}/{} (expected {})",
            event.efficiency, event.score, event.total_questions, expected
        )));
    }
    Ok(())
}

/// Apply a completion for `user_id` on `today_index` and persist the result.
pub async fn record_completion(
    db: &Database,
    engine: &ProgressEngine,
    user_id: uuid::Uuid,
    language: Language,
    event: &QuizCompletion,
    today_index: u8,
    now: DateTime<Utc>,
) -> Result<CompletionOutcome> {
    let mut tx = db.begin().await?;

    db::ensure_progress(&mut tx, user_id).await?;
    let current = db::lock_progress(&mut tx, user_id).await?;

    // Dropping the transaction on error rolls back, leaving the row untouched.
    let update = engine.apply(&current.to_core_record(), event, today_index)?;

    let row = db::save_progress(
        &mut tx,
        user_id,
        &ProgressColumns::from_core_record(&update.record),
    )
    .await?;

    let attempt = DbQuizAttempt::from_completion(
        user_id,
        language,
        event,
        &update.summary,
        today_index,
        now,
    );
    db::insert_quiz_attempt(&mut tx, &attempt).await?;

    tx.commit().await?;

    Ok(CompletionOutcome { update, row })
}
