//! Registration and login endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::password::{hash_password, validate_password_strength, verify_password};
use crate::services::token::issue_token;
use crate::AppState;

/// POST /api/auth/register
/// Creates a learner account
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let new_user = validate_registration(payload)?;

    if state.db.get_user_by_email(&new_user.email).await?.is_some() {
        return Err(ApiError::BadRequest(
            "User already exists with this email".to_string(),
        ));
    }

    let user = state
        .db
        .create_user(&new_user)
        .await?
        .ok_or_else(|| ApiError::BadRequest("User already exists with this email".to_string()))?;

    tracing::info!("Registered new user: {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// POST /api/auth/login
/// Verifies credentials and returns a session token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let invalid = || ApiError::Unauthorized("Invalid credentials".to_string());

    let email = normalize_email(&payload.email);
    let user = state
        .db
        .get_user_by_email(&email)
        .await?
        .filter(|u| u.user_type() == payload.user_type)
        .ok_or_else(invalid)?;

    let valid = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::warn!("Failed login for user {}", user.id);
        return Err(invalid());
    }

    state.db.update_last_login(user.id).await?;

    let token = issue_token(&user, &state.config.jwt_secret, state.config.jwt_expiry_days)
        .map_err(|e| ApiError::Internal(format!("Token generation error: {e}")))?;

    tracing::info!("User logged in: {}", user.id);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: user.to_api_user(),
    }))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Check a registration request and turn it into row values (password hashed).
fn validate_registration(payload: RegisterRequest) -> Result<NewUser> {
    let full_name = payload.full_name.trim().to_string();
    if full_name.is_empty() {
        return Err(ApiError::BadRequest("fullName is required".to_string()));
    }

    let mobile = payload.mobile.trim().to_string();
    if mobile.is_empty() {
        return Err(ApiError::BadRequest("mobile is required".to_string()));
    }

    let email = normalize_email(&payload.email);
    if !looks_like_email(&email) {
        return Err(ApiError::BadRequest("A valid email is required".to_string()));
    }

    let college_email = payload
        .college_email
        .as_deref()
        .map(normalize_email)
        .filter(|e| !e.is_empty());
    if let Some(ce) = &college_email {
        if !looks_like_email(ce) {
            return Err(ApiError::BadRequest("collegeEmail is not a valid email".to_string()));
        }
    }

    let selected_language = Language::from_str(&payload.selected_language).ok_or_else(|| {
        ApiError::BadRequest(format!("Unsupported language: {}", payload.selected_language))
    })?;

    validate_password_strength(&payload.password).map_err(ApiError::BadRequest)?;
    let password_hash = hash_password(&payload.password)
        .map_err(|e| ApiError::Internal(format!("Password hashing error: {e}")))?;

    Ok(NewUser {
        full_name,
        email,
        mobile,
        college_email,
        selected_language,
        password_hash,
        user_type: UserType::User,
    })
}
