//! Bearer token issuing and verification.
//!
//! Tokens are HS256 JWTs signed with the secret from [`crate::config::AuthConfig`].
//! The claims carry enough identity (`userId`, `email`, `name`) for handlers to
//! act without a user lookup on every request.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Claims embedded in every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub email: String,
    pub name: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

/// Signs and verifies bearer tokens. Cheap to clone, lives in app state.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_hours: i64,
}

impl TokenService {
    pub fn new(secret: &str, token_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_hours,
        }
    }

    /// Sign a fresh token for the given user.
    pub fn issue(&self, user_id: i64, email: &str, name: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            email: email.to_string(),
            name: name.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.token_hours)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))
    }

    /// Decode and verify a token, distinguishing expiry from every other defect.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }
}
