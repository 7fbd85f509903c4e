//! Pollwatch - Main Entry Point
//! Polls the configured searches and takes control commands over HTTP.

mod logging;
mod settings;

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use pollwatch_api_http::HttpServer;
use pollwatch_core::application::worker::constants::SHUTDOWN_GRACE_PERIOD;
use pollwatch_core::application::Engine;
use pollwatch_core::port::StdoutSink;
use pollwatch_infra_reddit::RedditSearchProvider;

use settings::Settings;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const SERVER_STOP_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    logging::init_logging().context("Failed to initialize logging")?;

    info!("Pollwatch v{} starting...", VERSION);

    // 2. Load configuration
    let config_path = settings::config_path();
    info!(config_path = %config_path, "Loading configuration...");
    let settings = Settings::load(&config_path)?;
    let jobs = settings.job_specs();

    // 3. Setup dependencies (DI wiring)
    let provider = Arc::new(
        RedditSearchProvider::new(settings.reddit_config())
            .context("Failed to create search provider")?,
    );
    let sink = Arc::new(StdoutSink);

    // 4. Start engine (workers + request serializer), seeding every job
    info!(jobs = jobs.len(), "Starting engine...");
    let engine = Engine::new(settings.engine_config(), provider, sink);
    let handle = engine.start(jobs).await.context("Engine start failed")?;

    // 5. Start control plane
    let server = HttpServer::new(settings.http_config(), handle.commands());
    let (addr, server_handle) = server
        .start(handle.shutdown_token())
        .await
        .context("Control plane start failed")?;

    info!(addr = %addr, "✅ System ready. POST /exit to stop (or press Ctrl+C)");

    // 6. Wait for Exit or a shutdown signal
    tokio::select! {
        _ = handle.wait_for_exit() => {
            info!("Exit command received. Exiting gracefully...");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            info!("Shutdown signal received. Exiting gracefully...");
            handle.request_shutdown();
        }
    }

    // 7. Graceful shutdown: in-flight rounds get a grace period, then abort
    handle.join(SHUTDOWN_GRACE_PERIOD).await;
    let _ = tokio::time::timeout(SERVER_STOP_TIMEOUT, server_handle).await;

    info!("Shutdown complete.");

    Ok(())
}
