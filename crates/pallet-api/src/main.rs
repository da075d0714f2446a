//! # Pallet Pricer
//!
//! Shipment pricing service.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export WEBHOOK_SECRET=...
//! export PORT=5000            # optional
//! export LOG_FORMAT=json      # optional
//!
//! # Run the server
//! pallet-pricer
//! ```

use anyhow::Context;
use pallet_api::{routes, state::AppState};
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .with(json_logs.then(|| fmt::layer().json().flatten_event(true)))
        .with((!json_logs).then(|| fmt::layer()))
        .init();

    // Refuses to start without WEBHOOK_SECRET
    let state = AppState::from_env()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!(
        environment = %state.config.environment,
        pallet_tiers = state.calculator.table().pallet_tiers.len(),
        services = state.calculator.table().services.len(),
        "config_loaded"
    );

    let app = routes::create_router(state);

    info!("Pallet pricer starting on http://{}", addr);

    if !is_prod {
        info!("Quote: POST http://{}/upload_data", addr);
        info!("Webhook: POST http://{}/webhook", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("server_shutdown_complete");

    Ok(())
}

/// Completes when SIGINT or SIGTERM is received
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("server_shutting_down");
}
