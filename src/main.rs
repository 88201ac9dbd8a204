use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pqc_dashboard::{config::Config, handlers, server, store::MetricStore, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pqc_dashboard=info")),
        )
        .init();

    let config = Config::parse();
    tracing::debug!(?config, "configuration loaded");

    // ── 1. Initialise the history store ─────────────────────────
    let store = MetricStore::init(&config.db_path)
        .with_context(|| format!("opening metrics store {}", config.db_path.display()))?;

    // ── 2. Build shared state ───────────────────────────────────
    let state = Arc::new(AppState::new(store, config.stream_interval()));

    // ── 3. Optional history recorder ────────────────────────────
    if config.record_interval_secs > 0 {
        handlers::recorder::spawn_recorder(&state, config.record_interval_secs)
            .await
            .context("starting recorder")?;
    }

    // ── 4. Build Axum router ────────────────────────────────────
    let app = server::create_router(state, &config.static_dir);

    // ── 5. Bind & serve ─────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("binding {}", config.listen))?;

    tracing::info!(
        addr = %config.listen,
        "dashboard at /, live JSON at /metrics/live, SSE at /metrics/stream"
    );

    axum::serve(listener, app)
        .await
        .context("server exited with error")?;
    Ok(())
}
