//! # Storefront Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHOPEASE_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use shopease_core::Money;
use tracing::warn;

use crate::error::StartupError;

/// Default simulated order placement latency.
pub const DEFAULT_ORDER_LATENCY_MS: u64 = 2000;

/// Storefront configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// Database file. `None` resolves to the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Simulated latency of order placement.
    /// Default: 2 seconds
    pub order_latency: Duration,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            database_path: None,
            order_latency: Duration::from_millis(DEFAULT_ORDER_LATENCY_MS),
            currency_symbol: "$".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SHOPEASE_DB_PATH`: Database file (`:memory:` for a throwaway store)
    /// - `SHOPEASE_ORDER_LATENCY_MS`: Order placement delay in milliseconds
    /// - `SHOPEASE_CURRENCY_SYMBOL`: Currency symbol for display
    pub fn from_env() -> Self {
        let mut config = StorefrontConfig::default();

        if let Ok(path) = std::env::var("SHOPEASE_DB_PATH") {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Ok(latency) = std::env::var("SHOPEASE_ORDER_LATENCY_MS") {
            match latency.parse::<u64>() {
                Ok(ms) => config.order_latency = Duration::from_millis(ms),
                Err(_) => warn!(value = %latency, "Ignoring invalid SHOPEASE_ORDER_LATENCY_MS"),
            }
        }

        if let Ok(symbol) = std::env::var("SHOPEASE_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Sets the order placement latency.
    pub fn order_latency(mut self, latency: Duration) -> Self {
        self.order_latency = latency;
        self
    }

    /// Determines the database file path.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.shopease.storefront/shopease.db`
    /// - **Windows**: `%APPDATA%\shopease\storefront\data\shopease.db`
    /// - **Linux**: `~/.local/share/storefront/shopease.db`
    pub fn resolve_database_path(&self) -> Result<PathBuf, StartupError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let proj_dirs = ProjectDirs::from("com", "shopease", "storefront")
            .ok_or(StartupError::DataDirUnavailable)?;

        let data_dir = proj_dirs.data_dir();

        // Create directory if it doesn't exist
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join("shopease.db"))
    }

    /// Formats money for display, with thousands separators.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(123456)), "$1,234.56");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let whole = (cents / 100).unsigned_abs().to_string();
        let frac = (cents % 100).abs();

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            grouped,
            frac
        )
    }

    /// Shipping as shown in the summary panel: zero reads "Free".
    pub fn format_shipping(&self, shipping: Money) -> String {
        if shipping.is_zero() {
            "Free".to_string()
        } else {
            self.format_currency(shipping)
        }
    }
}
