//! Server configuration module

use crate::catalog::{images::DEFAULT_STORAGE_BASE_URL, source::DEFAULT_PRODUCTS_URL};
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::time::Duration;

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Storefront server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront API server", long_about = None)]
pub struct StorefrontConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8000")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Endpoint returning the full product collection
    #[arg(long, env = "PRODUCTS_API_URL", default_value = DEFAULT_PRODUCTS_URL)]
    pub products_url: String,

    /// Base URL product thumbnails are appended to
    #[arg(long, env = "PRODUCT_STORAGE_URL", default_value = DEFAULT_STORAGE_BASE_URL)]
    pub storage_base_url: String,

    /// Product API request timeout in milliseconds
    #[arg(long, env = "PRODUCTS_API_TIMEOUT_MS", default_value = "10000")]
    pub products_timeout_ms: u64,

    /// Simulated order submission delay in milliseconds
    #[arg(long, env = "CHECKOUT_SUBMIT_DELAY_MS", default_value = "1500")]
    pub submit_delay_ms: u64,

    /// Delay before clients navigate home after an order, in milliseconds
    #[arg(long, env = "CHECKOUT_REDIRECT_DELAY_MS", default_value = "2000")]
    pub redirect_delay_ms: u64,

    /// Delivery charge used when the checkout form leaves it empty
    #[arg(long, env = "DEFAULT_DELIVERY_CHARGE", default_value = "80")]
    pub delivery_charge: Decimal,

    /// Sessions untouched for this many seconds are dropped
    #[arg(long, env = "SESSION_IDLE_TIMEOUT_SECS", default_value = "1800")]
    pub session_idle_timeout_secs: u64,

    /// How often idle sessions are swept, in seconds (at least 1)
    #[arg(long, env = "SESSION_SWEEP_INTERVAL_SECS", default_value = "60")]
    pub session_sweep_interval_secs: u64,
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Runtime settings for the application state.
    pub fn settings(&self) -> StorefrontSettings {
        StorefrontSettings {
            products_url: self.products_url.clone(),
            storage_base_url: self.storage_base_url.clone(),
            products_timeout: Duration::from_millis(self.products_timeout_ms),
            submit_delay: Duration::from_millis(self.submit_delay_ms),
            redirect_delay: Duration::from_millis(self.redirect_delay_ms),
            default_delivery_charge: self.delivery_charge,
            session_idle_timeout: Duration::from_secs(self.session_idle_timeout_secs),
            session_sweep_interval: Duration::from_secs(self.session_sweep_interval_secs.max(1)),
        }
    }
}

/// Settings the application state is built from
#[derive(Debug, Clone)]
pub struct StorefrontSettings {
    pub products_url: String,
    pub storage_base_url: String,
    pub products_timeout: Duration,
    pub submit_delay: Duration,
    pub redirect_delay: Duration,
    pub default_delivery_charge: Decimal,
    pub session_idle_timeout: Duration,
    pub session_sweep_interval: Duration,
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self {
            products_url: DEFAULT_PRODUCTS_URL.to_owned(),
            storage_base_url: DEFAULT_STORAGE_BASE_URL.to_owned(),
            products_timeout: Duration::from_secs(10),
            submit_delay: Duration::from_millis(1500),
            redirect_delay: Duration::from_millis(2000),
            default_delivery_charge: Decimal::from(80),
            session_idle_timeout: Duration::from_secs(1800),
            session_sweep_interval: Duration::from_secs(60),
        }
    }
}
