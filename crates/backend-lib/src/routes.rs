// ============================
// glasshouse-backend-lib/src/routes.rs
// ============================
//! Router assembly and HTTP handlers.
use axum::{
    extract::{Extension, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use glasshouse_common::{
    CredentialsRequest, HealthResponse, LoginResponse, ProfileResponse,
};

use crate::auth::Claims;
use crate::config::Settings;
use crate::demo;
use crate::error::AppError;
use crate::live;
use crate::middleware::{request_log, require_session};
use crate::store::CredentialStore;
use crate::AppState;

/// Create the application router
pub fn create_router<S: CredentialStore>(state: AppState<S>) -> Router {
    let protected = Router::new()
        .route("/api/user/profile", get(profile::<S>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session::<S>,
        ));

    let mut router = Router::new()
        .route("/api/auth/register", post(register::<S>))
        .route("/api/auth/login", post(login::<S>))
        .route("/api/health", get(health::<S>))
        .route("/ws", get(live::feed::<S>))
        .merge(protected);

    // teaching surface: deliberately exposes hash internals, mounted only
    // when explicitly enabled
    if state.settings.demo_mode {
        router = router.merge(demo::router::<S>());
    }

    router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_log::<S>,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.settings))
        .with_state(state)
}

fn cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Handler for `POST /api/auth/register`
async fn register<S: CredentialStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let registered = state.auth.register(body.identifier, body.password).await?;
    Ok((StatusCode::CREATED, Json(registered)))
}

/// Handler for `POST /api/auth/login`
async fn login<S: CredentialStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let login = state.auth.login(body.identifier, body.password).await?;
    Ok(Json(login))
}

/// Handler for `GET /api/user/profile`. The session gate has already
/// verified the token and stashed its claims.
async fn profile<S: CredentialStore>(
    State(state): State<AppState<S>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state
        .store
        .find_by_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("user".to_string()))?;

    Ok(Json(ProfileResponse {
        id: user.id,
        identifier: user.identifier,
        created_at: user.created_at,
    }))
}

/// Handler for `GET /api/health`
async fn health<S: CredentialStore>(State(state): State<AppState<S>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        secure: state.settings.tls_terminated,
        timestamp: Utc::now(),
    })
}
