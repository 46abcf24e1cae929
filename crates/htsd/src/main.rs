//! htsd - HTTP-to-serial bridge daemon
//!
//! Accepts HTTP POST bodies on any path and writes the raw bytes to a
//! serial device, so browser-based clients can drive attached hardware.
//!
//! Usage:
//!   htsd [OPTIONS] <DEVICE>
//!
//! Examples:
//! ```bash
//! htsd /dev/ttyUSB0
//! htsd --config htsd.toml
//! htsd /dev/ttyACM0 --port 9000 --bind 127.0.0.1
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use hts_api::{create_router, AppState};
use hts_device::{create_sink, DeviceWriter};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;

use cli::Args;
use config::BridgeConfig;

/// How long queued payloads get to reach the device after the server stops
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose {
        "htsd=debug,hts_api=debug,hts_device=debug,tower_http=debug"
    } else {
        "htsd=info,hts_api=info,hts_device=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from: {}", path.display());
            BridgeConfig::load(path)?
        }
        None => BridgeConfig::default(),
    };
    args.apply(&mut config);

    let device = config.device_path()?;
    if !device.exists() {
        warn!(
            device = %device.display(),
            "Device path does not exist yet; POSTs will fail until it appears"
        );
    }

    info!("Starting htsd (HTTP-to-serial bridge)");
    info!(
        device = %device.display(),
        queue_depth = config.device.queue_depth,
        max_payload_bytes = config.server.max_payload_bytes
    );

    let (writer, worker) =
        DeviceWriter::spawn(create_sink(device), config.device.queue_depth);
    let state = AppState::with_max_payload(writer, config.server.max_payload_bytes);
    let app = create_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind http://{}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and every writer handle) is gone now; let the worker
    // finish whatever was already queued.
    if tokio::time::timeout(DRAIN_TIMEOUT, worker).await.is_err() {
        warn!("Device writer did not finish within {:?}", DRAIN_TIMEOUT);
    }

    info!("htsd stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
