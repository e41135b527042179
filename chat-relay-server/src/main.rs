use anyhow::Context;
use chat_relay_core::config::{self, SafeLogging};
use chat_relay_server::{init_tracing, router, AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = config::load_from_env().context("failed to load configuration")?;
    info!("Starting chat relay {}: {}", chat_relay_core::version(), config.safe_for_logging());
    if config.is_offline() {
        info!("No API key configured, all replies come from the offline fallback");
    }

    let state = AppState::from_config(&config).context("failed to build completion client")?;
    let app = router(state);

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!("failed to bind {}:{}", config.server.host, config.server.port)
        })?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Could not listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
