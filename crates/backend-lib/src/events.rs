// ============================
// glasshouse-backend-lib/src/events.rs
// ============================
//! Security-event fan-out.
//!
//! Everything observable — security events, request-log entries, console
//! lines — goes through one broadcast channel. Publishing is fire-and-forget:
//! a publish with no subscribers is not an error, and a slow viewer lags and
//! loses the oldest messages instead of ever stalling the publisher. A
//! subscriber's feed starts at the moment of subscription; there is no replay.
use glasshouse_common::{
    ConsoleLine, EventCategory, EventStatus, LiveMessage, RequestLogEntry, SecurityEvent,
};
use metrics::counter;
use tokio::sync::broadcast;

use crate::metrics::EVENTS_PUBLISHED;

/// Fan-out hub for live dashboard messages
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<LiveMessage>,
}

impl EventBus {
    /// Create a bus whose subscribers each buffer up to `capacity` messages
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to the live feed from this moment on
    pub fn subscribe(&self) -> broadcast::Receiver<LiveMessage> {
        self.tx.subscribe()
    }

    /// Number of currently connected subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Publish a message to every current subscriber
    pub fn publish(&self, message: LiveMessage) {
        counter!(EVENTS_PUBLISHED).increment(1);
        // no subscribers is fine
        let _ = self.tx.send(message);
    }

    /// Emit a security event, mirrored as a console line like the backend
    /// terminal view expects
    pub fn security(&self, event: SecurityEvent) {
        let line = format!(
            "[SECURITY][{}] {} {}",
            category_label(event.category),
            event.action,
            event.detail
        );
        self.publish(LiveMessage::ConsoleLog(ConsoleLine::new("info", line)));
        self.publish(LiveMessage::SecurityEvent(event));
    }

    pub fn auth(&self, action: &str, status: EventStatus, detail: serde_json::Value) {
        self.security(SecurityEvent::new(
            EventCategory::Authentication,
            action,
            detail,
            status,
        ));
    }

    pub fn encryption(&self, action: &str, detail: serde_json::Value) {
        self.security(SecurityEvent::new(
            EventCategory::Encryption,
            action,
            detail,
            EventStatus::Secure,
        ));
    }

    pub fn attack(&self, kind: &str, detail: serde_json::Value, blocked: bool) {
        let status = if blocked {
            EventStatus::Blocked
        } else {
            EventStatus::Warning
        };
        self.security(SecurityEvent::new(
            EventCategory::AttackAttempt,
            kind,
            detail,
            status,
        ));
    }

    pub fn database(&self, query_type: &str, encrypted: bool) {
        self.security(SecurityEvent::new(
            EventCategory::Database,
            query_type,
            serde_json::json!({ "encrypted": encrypted }),
            EventStatus::Protected,
        ));
    }

    /// Push a console-style log line to connected dashboards
    pub fn console(&self, level: &str, message: impl Into<String>) {
        self.publish(LiveMessage::ConsoleLog(ConsoleLine::new(level, message)));
    }

    /// Push one request-log entry to the network monitor view
    pub fn request(&self, entry: RequestLogEntry) {
        self.publish(LiveMessage::NetworkRequest(entry));
    }
}

fn category_label(category: EventCategory) -> &'static str {
    match category {
        EventCategory::Encryption => "ENCRYPTION",
        EventCategory::Authentication => "AUTHENTICATION",
        EventCategory::AttackAttempt => "ATTACK_ATTEMPT",
        EventCategory::Database => "DATABASE",
    }
}
