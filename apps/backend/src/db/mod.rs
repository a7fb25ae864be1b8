//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Window used to count a student as active.
const ACTIVE_WINDOW_DAYS: i32 = 7;

const USER_COLUMNS: &str = "id, full_name, email, mobile, college_email, selected_language, \
     password_hash, user_type, created_at, last_login_at";

const PROGRESS_COLUMNS: &str = "user_id, completed_days, streak, coins, current_day, level, \
     efficiency, total_quizzes_completed, last_quiz_at, created_at, updated_at";

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Start a transaction
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    // === User Repository ===

    /// Insert a new user; returns `None` when the email is already taken
    pub async fn create_user(&self, user: &NewUser) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, full_name, email, mobile, college_email,
                               selected_language, password_hash, user_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.mobile)
        .bind(&user.college_email)
        .bind(user.selected_language.as_str())
        .bind(&user.password_hash)
        .bind(user.user_type.as_str())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(Some(created)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get user by ID
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by email
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user last_login_at timestamp
    pub async fn update_last_login(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_login_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Progress Repository ===

    /// Get the progress row for a user, creating a default one if absent
    pub async fn get_or_create_progress(&self, user_id: Uuid) -> Result<DbProgress> {
        let mut conn = self.pool.acquire().await?;
        ensure_progress(&mut conn, user_id).await?;

        let progress = sqlx::query_as::<_, DbProgress>(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM progress WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(progress)
    }

    // === Statistics ===

    /// Aggregate numbers for the faculty dashboard
    pub async fn get_faculty_stats(&self) -> Result<FacultyStats> {
        let stats = sqlx::query_as::<_, FacultyStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users WHERE user_type = 'user') AS total_students,
                (SELECT COUNT(DISTINCT user_id) FROM quiz_attempts
                  WHERE completed_at >= NOW() - make_interval(days => $1)) AS active_students,
                (SELECT COUNT(*) FROM quiz_attempts) AS total_quizzes,
                (SELECT COALESCE(ROUND(AVG(efficiency)), 0)::BIGINT FROM quiz_attempts) AS average_score
            "#,
        )
        .bind(ACTIVE_WINDOW_DAYS)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}

// === Transactional Progress Operations ===
//
// These run on a caller-owned connection so the read-apply-write sequence of a
// quiz completion can share one transaction.

/// Insert a default progress row unless one exists
pub async fn ensure_progress(conn: &mut PgConnection, user_id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO progress (user_id)
        VALUES ($1)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .execute(conn)
    .await?;

    Ok(())
}

/// Read a progress row and hold a row lock until the transaction ends
pub async fn lock_progress(conn: &mut PgConnection, user_id: Uuid) -> Result<DbProgress> {
    let progress = sqlx::query_as::<_, DbProgress>(&format!(
        "SELECT {PROGRESS_COLUMNS} FROM progress WHERE user_id = $1 FOR UPDATE"
    ))
    .bind(user_id)
    .fetch_one(conn)
    .await?;

    Ok(progress)
}

/// Write an updated record and bump the completion counters
pub async fn save_progress(
    conn: &mut PgConnection,
    user_id: Uuid,
    columns: &ProgressColumns,
) -> Result<DbProgress> {
    let progress = sqlx::query_as::<_, DbProgress>(&format!(
        r#"
        UPDATE progress SET
            completed_days = $2,
            streak = $3,
            coins = $4,
            current_day = $5,
            level = $6,
            efficiency = $7,
            total_quizzes_completed = total_quizzes_completed + 1,
            last_quiz_at = NOW(),
            updated_at = NOW()
        WHERE user_id = $1
        RETURNING {PROGRESS_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&columns.completed_days)
    .bind(columns.streak)
    .bind(columns.coins)
    .bind(columns.current_day)
    .bind(columns.level)
    .bind(columns.efficiency)
    .fetch_one(conn)
    .await?;

    Ok(progress)
}

/// Record a finished quiz in the history table
pub async fn insert_quiz_attempt(conn: &mut PgConnection, attempt: &DbQuizAttempt) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO quiz_attempts (id, user_id, language, score, total_questions,
                                   efficiency, coins_earned, day_of_week, answers, completed_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(attempt.id)
    .bind(attempt.user_id)
    .bind(&attempt.language)
    .bind(attempt.score)
    .bind(attempt.total_questions)
    .bind(attempt.efficiency)
    .bind(attempt.coins_earned)
    .bind(attempt.day_of_week)
    .bind(&attempt.answers)
    .bind(attempt.completed_at)
    .execute(conn)
    .await?;

    Ok(())
}
