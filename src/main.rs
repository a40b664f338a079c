use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cozy_api::app::{self, AppState, Repositories};
use cozy_api::auth::TokenCodec;
use cozy_api::config::AppConfig;
use cozy_api::database::manager;
use cozy_api::events::{self, EventSink};

#[derive(Parser)]
#[command(name = "cozy-api")]
#[command(about = "Cozy API - auth, calendars, events, projects and tasks")]
#[command(version)]
struct Cli {
    #[arg(long, default_value = "0.0.0.0", help = "Address to bind")]
    host: String,

    #[arg(long, env = "COZY_API_PORT", help = "Port to listen on (falls back to PORT, then 3000)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cozy_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    tracing::info!("Starting Cozy API in {:?} mode", config.environment);

    let codec = TokenCodec::new(config.security.jwt_secret.clone(), config.security.jwt_ttl_hours);
    if !codec.is_configured() {
        tracing::error!("CRITICAL: JWT_SECRET is not set, refusing to start");
        anyhow::bail!("JWT_SECRET must be set");
    }

    let pool = manager::connect_lazy(&config.database).context("failed to create database pool")?;
    let sink = events::sink_for(config.events.sink);
    tracing::info!("Event sink: {}", sink.name());

    let state = AppState::new(codec, Repositories::postgres(&pool), sink, Some(pool));
    let app = app::router(state, &config);

    let port = cli
        .port
        .or_else(|| std::env::var("PORT").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(3000);
    let bind_addr = format!("{}:{}", cli.host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Cozy API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
