use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use glasshouse_backend_lib::{config::Settings, routes, store::MemoryStore, AppState};

/// Glasshouse: an auth service with a live security-event dashboard feed.
/// TLS termination belongs to the hosting boundary (a reverse proxy or the
/// platform), not to this process.
#[derive(Parser, Debug)]
#[command(name = "glasshouse", version)]
struct Cli {
    /// Path to a TOML config file (environment variables still apply)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address from config
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(bind) = cli.bind {
        settings.bind_addr = bind;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if settings.uses_default_secret() {
        tracing::warn!(
            "signing secret is the placeholder default; set GLASSHOUSE_SIGNING_SECRET before \
             exposing this service"
        );
    }

    let bind_addr = settings.bind_addr;
    let state = AppState::new(MemoryStore::new(), settings.clone());
    let app = routes::create_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(
        addr = %bind_addr,
        secure = settings.tls_terminated,
        demo_mode = settings.demo_mode,
        "glasshouse listening"
    );
    tracing::info!("POST /api/auth/register - register new user");
    tracing::info!("POST /api/auth/login    - login user");
    tracing::info!("GET  /api/user/profile  - user profile (bearer token)");
    tracing::info!("GET  /api/health        - health check");
    tracing::info!("GET  /ws                - live security-event feed");

    axum::serve(listener, app).await?;

    Ok(())
}
