// ============================
// glasshouse-backend-lib/src/lib.rs
// ============================
//! Core functionality for the Glasshouse auth + security-dashboard server.

pub mod auth;
pub mod config;
pub mod demo;
pub mod error;
pub mod events;
pub mod live;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod store;
pub mod validation;

use std::sync::Arc;

use crate::auth::{AuthService, PasswordHasher, TokenService};
use crate::config::Settings;
use crate::events::EventBus;
use crate::store::CredentialStore;

/// Application state shared across all handlers
pub struct AppState<S> {
    /// Authentication service
    pub auth: Arc<AuthService<S>>,
    /// Credential store
    pub store: Arc<S>,
    /// Session token issuer/verifier
    pub tokens: Arc<TokenService>,
    /// Live-feed fan-out
    pub events: EventBus,
    /// Settings, read-only after startup
    pub settings: Arc<Settings>,
}

impl<S: CredentialStore> AppState<S> {
    /// Create a new application state
    pub fn new(store: S, settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let store = Arc::new(store);
        let events = EventBus::new(settings.event_buffer);
        let tokens = Arc::new(TokenService::new(
            &settings.signing_secret,
            settings.token_ttl_secs,
        ));
        let hasher = PasswordHasher::new(settings.hash_cost);
        let auth = Arc::new(AuthService::new(
            store.clone(),
            hasher,
            tokens.clone(),
            events.clone(),
        ));

        Self {
            auth,
            store,
            tokens,
            events,
            settings,
        }
    }
}

// manual impl: S itself does not need to be Clone behind the Arcs
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
            store: self.store.clone(),
            tokens: self.tokens.clone(),
            events: self.events.clone(),
            settings: self.settings.clone(),
        }
    }
}
