// ============================
// glasshouse-backend-lib/src/demo.rs
// ============================
//! Teaching endpoints.
//!
//! These deliberately return material the rest of the service never exposes
//! (salts, full hashes, timings) so a dashboard can visualize what hashing
//! actually does. They are only mounted when `demo_mode` is enabled and must
//! never be reachable in a real deployment.
use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::time::Instant;

use glasshouse_common::{
    EncryptPasswordRequest, EncryptPasswordResponse, SimulateAttackRequest,
    SimulateAttackResponse,
};

use crate::auth::salt_part;
use crate::error::AppError;
use crate::store::CredentialStore;
use crate::AppState;

pub fn router<S: CredentialStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/demo/encrypt-password", post(encrypt_password::<S>))
        .route("/demo/simulate-attack", post(simulate_attack::<S>))
}

/// Hash a supplied password and return the full salt/hash/timing breakdown
async fn encrypt_password<S: CredentialStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<EncryptPasswordRequest>,
) -> Result<Json<EncryptPasswordResponse>, AppError> {
    if body.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    let hasher = state.auth.hasher().clone();
    let start = Instant::now();
    let hash = tokio::task::spawn_blocking(move || hasher.hash(&body.password))
        .await
        .map_err(|e| AppError::Internal(format!("hash task: {e}")))?
        .map_err(|e| AppError::Internal(format!("hash: {e}")))?;
    let duration_ms = start.elapsed().as_millis() as u64;

    let cost = state.auth.hasher().cost();
    let salt = salt_part(&hash).unwrap_or_default();

    state.events.encryption(
        "HASH_PASSWORD",
        json!({
            "algorithm": "scrypt",
            "cost": cost,
            "salt": salt,
            "hash": hash,
            "durationMs": duration_ms,
        }),
    );

    Ok(Json(EncryptPasswordResponse {
        algorithm: "scrypt".to_string(),
        cost,
        salt,
        hash,
        duration_ms,
    }))
}

/// Scripted attack simulation: whatever comes in gets reported as blocked.
/// This is theater for the dashboard, not detection.
async fn simulate_attack<S: CredentialStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<SimulateAttackRequest>,
) -> Result<Json<SimulateAttackResponse>, AppError> {
    if body.kind.is_empty() {
        return Err(AppError::Validation("Attack type is required".to_string()));
    }

    state.events.attack(
        &body.kind,
        json!({ "payload": body.payload }),
        true,
    );
    state.events.console(
        "warn",
        format!("blocked simulated {} attempt", body.kind),
    );

    Ok(Json(SimulateAttackResponse {
        blocked: true,
        kind: body.kind,
        message: "Attack detected and blocked".to_string(),
    }))
}
