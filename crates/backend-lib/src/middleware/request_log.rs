// ============================
// glasshouse-backend-lib/src/middleware/request_log.rs
// ============================
//! Request logging onto the live feed.
//!
//! Runs after the response is produced, so it sees the final status. Only
//! method, path, status, and timing are published — request bodies (and the
//! passwords inside them) never reach this layer.
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use metrics::histogram;
use std::time::Instant;
use uuid::Uuid;

use glasshouse_common::RequestLogEntry;

use crate::metrics::HTTP_REQUEST_DURATION_MS;
use crate::store::CredentialStore;
use crate::AppState;

pub async fn request_log<S: CredentialStore>(
    State(state): State<AppState<S>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status().as_u16();
    histogram!(HTTP_REQUEST_DURATION_MS).record(duration.as_millis() as f64);
    tracing::debug!(%method, %path, status, ?duration, "request");

    state
        .events
        .console("info", format!("{method} {path} -> {status}"));
    state.events.request(RequestLogEntry {
        id: Uuid::new_v4().to_string(),
        timestamp: Utc::now(),
        method: method.to_string(),
        path,
        status,
        duration_ms: duration.as_millis() as u64,
        encrypted: state.settings.tls_terminated,
    });

    response
}
