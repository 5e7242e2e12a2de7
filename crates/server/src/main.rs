mod bootstrap;
mod clients;
mod health;
pub mod pricing;

use anyhow::Result;
use pricely_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use pricely_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Logging comes up before anything else can fail.
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config).await?;
    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        "pricely-server started"
    );

    let shutdown_grace = app.config.server.graceful_shutdown_secs;
    let router = health::router(&app.config).merge(pricing::router(app.into_state()));
    axum::serve(listener, router).with_graceful_shutdown(wait_for_shutdown(shutdown_grace)).await?;

    tracing::info!(
        event_name = "system.server.stopped",
        correlation_id = "shutdown",
        "pricely-server stopped"
    );

    Ok(())
}

async fn wait_for_shutdown(grace_secs: u64) {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    tracing::info!(
        event_name = "system.server.stopping",
        correlation_id = "shutdown",
        grace_secs,
        "shutdown signal received, draining in-flight requests"
    );
}
