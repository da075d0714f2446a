//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the price calculator, the webhook verifier and configuration.
//! Everything here is built once at startup and only read afterwards.

use anyhow::Context;
use pallet_core::{PriceCalculator, PriceTable};
use pallet_webhook::{SignatureVerifier, WebhookConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit rate table path
    pub rates_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(5000),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            rates_path: lookup("RATES_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: "development".to_string(),
            rates_path: None,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Price calculator
    pub calculator: Arc<PriceCalculator>,
    /// Webhook signature verifier
    pub verifier: Arc<SignatureVerifier>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Assemble state from already-loaded parts
    pub fn new(config: AppConfig, table: PriceTable, webhook: WebhookConfig) -> Self {
        Self {
            calculator: Arc::new(PriceCalculator::new(table)),
            verifier: Arc::new(SignatureVerifier::new(webhook)),
            config,
        }
    }

    /// Load everything from the environment.
    ///
    /// Fails when `WEBHOOK_SECRET` is unset or the rate table is invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let webhook = WebhookConfig::from_env().context("Webhook secret is required")?;
        let table = load_price_table(&config)?;

        Ok(Self::new(config, table, webhook))
    }
}

/// Load the rate table from `RATES_PATH` or `config/rates.toml`, falling back to built-in rates
pub fn load_price_table(config: &AppConfig) -> anyhow::Result<PriceTable> {
    if let Some(path) = &config.rates_path {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rate table {}", path.display()))?;
        let table = PriceTable::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            tiers = table.pallet_tiers.len(),
            "rate_table_loaded"
        );
        return Ok(table);
    }

    let config_paths = [
        "config/rates.toml",
        "../config/rates.toml",
        "../../config/rates.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let table = PriceTable::from_toml(&content)
                .with_context(|| format!("Failed to parse {}", path))?;
            tracing::info!(path, tiers = table.pallet_tiers.len(), "rate_table_loaded");
            return Ok(table);
        }
    }

    tracing::warn!("No rate table found, using built-in rates");
    Ok(PriceTable::default())
}
