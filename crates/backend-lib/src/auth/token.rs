// ============================
// glasshouse-backend-lib/src/auth/token.rs
// ============================
//! Session token issuance and verification (HS256).
//!
//! Tokens are stateless: validity is purely computable from the token, the
//! signing secret, and the clock. There is no revocation list, so a leaked
//! token stays valid until its natural expiry — a documented limitation of
//! the scheme, not something this module papers over.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

/// Claims embedded in a session token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject — user id
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at (unix timestamp)
    pub iat: i64,
    /// Expiry (unix timestamp)
    pub exp: i64,
}

/// Why a token failed verification
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Structurally valid and correctly signed, but past its expiry
    #[error("token expired")]
    Expired,
    /// Anything else: bad signature, wrong secret, garbage input
    #[error("token invalid")]
    Invalid,
}

/// Issues and verifies session tokens with a process-wide symmetric secret,
/// loaded once at startup.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // exact expiry, no clock leeway
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs as i64),
            validation,
        }
    }

    /// Issue a signed token for a user, expiring ttl from now
    pub fn issue(&self, user_id: &str, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("token encode: {e}")))
    }

    /// Verify a token, returning its claims on success
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
