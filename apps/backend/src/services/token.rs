//! Signed session tokens.
//!
//! Tokens are HS256 JWTs carrying the user id, email and account type.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{User, UserType};

/// JWT claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id.
    pub sub: Uuid,
    pub email: String,
    pub user_type: UserType,
    pub iat: i64,
    pub exp: i64,
}

/// Issue a token for `user` valid for `expiry_days`.
pub fn issue_token(
    user: &User,
    secret: &str,
    expiry_days: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        user_type: user.user_type(),
        iat: now.timestamp(),
        exp: (now + Duration::days(expiry_days)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate signature and expiry, returning the claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-long-enough";

    fn user(user_type: &str) -> User {
        User {
            id: Uuid::new_v4(),
            full_name: "Marie Curie".to_string(),
            email: "marie@example.com".to_string(),
            mobile: "0600000000".to_string(),
            college_email: None,
            selected_language: "french".to_string(),
            password_hash: String::new(),
            user_type: user_type.to_string(),
            created_at: Utc::now(),
            last_login_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let user = user("faculty");
        let token = issue_token(&user, SECRET, 7).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "marie@example.com");
        assert_eq!(claims.user_type, UserType::Faculty);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = issue_token(&user("user"), SECRET, 7).unwrap();
        assert!(verify_token(&token, "another-secret").is_err());
    }

    #[test]
    fn test_expired_token_fails() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "old@example.com".to_string(),
            user_type: UserType::User,
            iat: now - 600,
            exp: now - 300,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_garbage_token_fails() {
        assert!(verify_token("not.a.jwt", SECRET).is_err());
    }
}
