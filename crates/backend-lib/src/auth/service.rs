// ============================
// glasshouse-backend-lib/src/auth/service.rs
// ============================
//! Registration and login orchestration.
use metrics::counter;
use serde_json::json;
use std::sync::Arc;
use zeroize::Zeroize;

use glasshouse_common::{EventStatus, LoginResponse, RegisterResponse};

use crate::auth::password::PasswordHasher;
use crate::auth::token::TokenService;
use crate::error::AppError;
use crate::events::EventBus;
use crate::metrics::{AUTH_LOGIN, AUTH_LOGIN_FAILED, AUTH_REGISTER};
use crate::store::{CredentialStore, UserRecord};
use crate::validation;

/// Auth service wiring the credential store, password hasher, and token
/// issuer together. Holds no request state of its own: the store is the only
/// shared mutable resource, and its atomic insert is the sole
/// synchronization point.
pub struct AuthService<S> {
    store: Arc<S>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
    events: EventBus,
}

impl<S: CredentialStore> AuthService<S> {
    pub fn new(
        store: Arc<S>,
        hasher: PasswordHasher,
        tokens: Arc<TokenService>,
        events: EventBus,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
            events,
        }
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Register a new user.
    ///
    /// The duplicate check here is a fast path; the store's atomic insert is
    /// what actually guarantees one winner when registrations race. Plaintext
    /// is zeroized as soon as the hash exists and never reaches the event
    /// feed or the response.
    pub async fn register(
        &self,
        identifier: String,
        password: String,
    ) -> Result<RegisterResponse, AppError> {
        validation::validate_credentials(&identifier, &password)?;
        validation::validate_new_password(&password)?;

        self.events.database("SELECT", true);
        if self.store.find_by_identifier(&identifier).await?.is_some() {
            return Err(AppError::Conflict);
        }

        tracing::debug!(identifier = %identifier, "hashing password");
        let password_hash = self.hash_blocking(password).await?;

        let record = UserRecord::new(identifier.clone(), password_hash);
        let id = record.id.clone();
        self.events.database("INSERT", true);
        self.store.insert(record).await?;

        counter!(AUTH_REGISTER).increment(1);
        tracing::info!(identifier = %identifier, id = %id, "user registered");
        self.events.auth(
            "REGISTER",
            EventStatus::Success,
            json!({ "identifier": identifier }),
        );

        Ok(RegisterResponse { id, identifier })
    }

    /// Log a user in, returning a fresh session token.
    ///
    /// Unknown identifier and wrong password produce the same error; only the
    /// event feed records which check failed.
    pub async fn login(
        &self,
        identifier: String,
        password: String,
    ) -> Result<LoginResponse, AppError> {
        validation::validate_credentials(&identifier, &password)?;

        self.events.database("SELECT", true);
        let Some(user) = self.store.find_by_identifier(&identifier).await? else {
            counter!(AUTH_LOGIN_FAILED).increment(1);
            self.events.auth(
                "LOGIN",
                EventStatus::Failure,
                json!({ "identifier": identifier, "reason": "unknown-identifier" }),
            );
            return Err(AppError::InvalidCredentials);
        };

        let verified = self
            .verify_blocking(password, user.password_hash.clone())
            .await?;
        if !verified {
            counter!(AUTH_LOGIN_FAILED).increment(1);
            tracing::info!(identifier = %identifier, "password verification failed");
            self.events.auth(
                "LOGIN",
                EventStatus::Failure,
                json!({ "identifier": identifier, "reason": "bad-password" }),
            );
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.id, &user.identifier)?;

        counter!(AUTH_LOGIN).increment(1);
        tracing::info!(identifier = %identifier, "user logged in");
        self.events.auth(
            "LOGIN",
            EventStatus::Success,
            json!({ "identifier": identifier }),
        );

        Ok(LoginResponse {
            token,
            id: user.id,
            identifier: user.identifier,
        })
    }

    /// Hash on a blocking worker so the tunable cost never stalls the
    /// request-handling threads.
    async fn hash_blocking(&self, mut password: String) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        let result = tokio::task::spawn_blocking(move || hasher.hash_secure(&mut password))
            .await
            .map_err(|e| AppError::Internal(format!("hash task: {e}")))?
            .map_err(|e| AppError::Internal(format!("hash: {e}")));
        if let Err(e) = &result {
            // the client gets an opaque Internal; detail stays server-side
            tracing::error!(error = %e, "password hashing failed");
            self.events.console("error", "password hashing failed");
        }
        result
    }

    async fn verify_blocking(&self, password: String, hash: String) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut password = password;
            let verified = hasher.verify(&password, &hash);
            password.zeroize();
            verified
        })
        .await
        .map_err(|e| AppError::Internal(format!("verify task: {e}")));
        if let Err(e) = &result {
            tracing::error!(error = %e, "password verification task failed");
            self.events.console("error", "password verification task failed");
        }
        result
    }
}
