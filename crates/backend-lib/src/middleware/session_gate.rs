// ============================
// glasshouse-backend-lib/src/middleware/session_gate.rs
// ============================
//! Bearer-token guard for protected routes.
//!
//! A pure function of (token, current time, signing secret): no store access,
//! no I/O, cheap enough to run on every protected call. On success the
//! verified claims ride along in the request extensions.
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::store::CredentialStore;
use crate::AppState;

/// Require a valid bearer token. Missing token → 401; present but invalid or
/// expired → 403.
pub async fn require_session<S: CredentialStore>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        AppError::Forbidden
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
