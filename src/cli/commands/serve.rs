use anyhow::Context;
use tracing::info;

use crate::app::{app, AppState};
use crate::config::{AppConfig, Environment};

pub async fn handle(mut config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set outside development");
    }
    if config.environment == Environment::Production && config.database.url.is_none() {
        anyhow::bail!("DATABASE_URL is required in production");
    }

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    info!("Starting Profile API in {:?} mode", config.environment);

    let state = AppState::from_config(config).await?;
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Profile API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}
