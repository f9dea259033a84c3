// ============================
// glasshouse-backend-lib/src/store.rs
// ============================
//! Credential store abstraction with an in-memory implementation.
//!
//! The store exclusively owns `UserRecord`s: records are created only by a
//! successful registration, never mutated afterwards, and there is no
//! deletion API. A durable backend can replace `MemoryStore` by implementing
//! `CredentialStore` without touching the auth service.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;

/// A registered user
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Opaque unique id, assigned at creation
    pub id: String,
    /// Email address used as the unique lookup key (case-sensitive)
    pub identifier: String,
    /// PHC-format digest from the password hasher
    pub password_hash: String,
    /// Creation time, set once
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(identifier: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            identifier,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Trait for credential store backends
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Look up a user by identifier
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserRecord>, AppError>;

    /// Look up a user by id
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, AppError>;

    /// Insert a new record. The existence check and the insert are a single
    /// atomic step: concurrent inserts with the same identifier yield exactly
    /// one success, the rest `Conflict`.
    async fn insert(&self, record: UserRecord) -> Result<(), AppError>;
}

/// In-memory implementation of the `CredentialStore` trait, keyed by
/// identifier. State is lost on restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<String, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.get(identifier).map(|r| r.clone()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().id == id)
            .map(|entry| entry.value().clone()))
    }

    async fn insert(&self, record: UserRecord) -> Result<(), AppError> {
        match self.users.entry(record.identifier.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict),
            Entry::Vacant(vacant) => {
                vacant.insert(record);
                Ok(())
            },
        }
    }
}
