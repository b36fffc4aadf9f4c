// ============================
// crates/backend-bin/src/main.rs
// ============================
//! Tokio / Axum entry‑point for the listings server.
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use backend_lib::{config::load_settings, create_router, storage::SqliteStorage, AppState};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Property listings HTTP server
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Config file (toml, yaml or json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind address
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Override the database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(default_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref()).context("loading settings")?;
    if let Some(bind) = cli.bind {
        settings.bind_addr = bind;
    }
    if let Some(url) = cli.database_url {
        settings.database_url = url;
    }

    init_tracing(&settings.log_level, cli.json_logs);

    let storage = SqliteStorage::connect(&settings.database_url, settings.max_connections)
        .await
        .context("connecting to database")?;

    let addr = settings.bind_addr;
    let cleanup_every = settings.session_cleanup_interval();
    let state = Arc::new(AppState::new(storage, settings)?);

    let seeded = state.seed_principals().await.context("seeding principals")?;
    info!(seeded, "principals ready");

    let cleanup = state.sessions.spawn_cleanup(cleanup_every);

    let app = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cleanup.abort();
    info!("server stopped");
    Ok(())
}
