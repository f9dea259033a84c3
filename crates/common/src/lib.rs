// ================
// common/src/lib.rs
// ================
//! Common types shared between the Glasshouse server and its viewers.
//! This module defines the HTTP request/response bodies and the live-feed
//! messages pushed to connected dashboards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a security event shown on the dashboard
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Encryption,
    Authentication,
    AttackAttempt,
    Database,
}

/// Outcome attached to a security event
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Success,
    Failure,
    Secure,
    Blocked,
    Warning,
    Protected,
}

/// A single security event. Events are transient: they exist only as
/// live-feed messages and are never persisted.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SecurityEvent {
    /// Unique event ID
    pub id: String,
    /// Emission time
    pub timestamp: DateTime<Utc>,
    /// Event category
    pub category: EventCategory,
    /// What happened (e.g. `REGISTER`, `LOGIN`, `HASH_PASSWORD`)
    pub action: String,
    /// Free-form structured payload
    pub detail: serde_json::Value,
    /// Outcome
    pub status: EventStatus,
}

impl SecurityEvent {
    pub fn new(
        category: EventCategory,
        action: impl Into<String>,
        detail: serde_json::Value,
        status: EventStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            category,
            action: action.into(),
            detail,
            status,
        }
    }
}

/// One entry of the request log pushed to the network monitor view
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RequestLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub path: String,
    pub status: u16,
    pub duration_ms: u64,
    /// Whether the hosting boundary terminates TLS in front of this service
    pub encrypted: bool,
}

/// A console-style log line mirrored to connected dashboards
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConsoleLine {
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub message: String,
}

impl ConsoleLine {
    pub fn new(level: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level: level.into(),
            message: message.into(),
        }
    }
}

/// Messages pushed over the live feed to every connected viewer.
/// One-way: viewers never send anything back over this channel.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "channel", content = "payload", rename_all = "kebab-case")]
pub enum LiveMessage {
    SecurityEvent(SecurityEvent),
    NetworkRequest(RequestLogEntry),
    ConsoleLog(ConsoleLine),
}

/// Body of `POST /api/auth/register` and `POST /api/auth/login`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CredentialsRequest {
    /// The email address used as the unique user key
    pub identifier: String,
    pub password: String,
}

/// Response to a successful registration
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterResponse {
    pub id: String,
    pub identifier: String,
}

/// Response to a successful login
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub id: String,
    pub identifier: String,
}

/// Response to `GET /api/user/profile`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub identifier: String,
    pub created_at: DateTime<Utc>,
}

/// Response to `GET /api/health`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: String,
    /// True when the hosting boundary terminates TLS
    pub secure: bool,
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /demo/encrypt-password`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EncryptPasswordRequest {
    pub password: String,
}

/// Response of the password-hashing demo. Deliberately exposes hash
/// internals; only served when demo mode is enabled.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EncryptPasswordResponse {
    pub algorithm: String,
    pub cost: u8,
    pub salt: String,
    pub hash: String,
    pub duration_ms: u64,
}

/// Body of `POST /demo/simulate-attack`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SimulateAttackRequest {
    /// Attack label, e.g. "SQL Injection"
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: String,
}

/// Response of the attack simulation. Always blocked: this is a scripted
/// teaching demo, not real detection.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SimulateAttackResponse {
    pub blocked: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}
