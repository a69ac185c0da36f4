//! # Vidgate - Vidpass Registration Service
//!
//! Issues registration identifiers (VIDs) for captured ID photos, runs the
//! simulated face-verification step, and expires stale registrations.
//!
//! ## Flow
//! ```text
//! Capture client → POST /api/id-reg              → VID issued, record stored
//!                → POST /api/photo-reg           → face verified, record completed
//!                → GET  /api/registration/{vid}  → status summary
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod registry;
mod routes;
mod state;
mod verify;

use crate::config::AppConfig;
use crate::registry::sweep_worker;
use crate::state::AppState;

/// Vidpass Vidgate - registration service
#[derive(Parser, Debug)]
#[command(name = "vidgate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/vidgate.toml")]
    config: String,

    /// Listen address (overrides config)
    #[arg(short, long, env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Listen port (overrides the port part of the listen address)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level, args.json_logs)?;

    info!(
        "🪪 Starting Vidpass Vidgate v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = AppConfig::load(&args.config, &args)?;
    info!("📋 Configuration loaded from {}", args.config);

    // Create shutdown broadcast channel
    let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(1);

    // Initialize application state
    let state = AppState::new(config.clone());

    // Spawn the expiry sweep worker
    let registry = state.registry.clone();
    let sweep_shutdown = shutdown_tx.subscribe();
    let sweep_interval = Duration::from_secs(config.registration.sweep_interval_secs);
    tokio::spawn(async move {
        sweep_worker(registry, sweep_interval, sweep_shutdown).await;
    });

    // Build router
    let app = routes::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("🚀 Vidgate listening on {}", config.listen_addr);

    // Handle graceful shutdown
    let shutdown_signal = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("🛑 Shutdown signal received");
        let _ = shutdown_tx.send(());
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    info!("👋 Vidgate shutdown complete");
    Ok(())
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .init();
    }

    Ok(())
}
