//! # Engine Configuration
//!
//! Configuration loaded once at terminal startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TILL_*`)
//! 2. Defaults (this file)
//!
//! The tax rate is injected into the checkout calculator at session
//! construction and is immutable for the life of the session; changing it
//! requires a terminal restart (matching how the server treats its own
//! tax-rate setting).

use std::path::PathBuf;

use directories::ProjectDirs;

use till_core::{Money, PaymentMethod, TaxRate};

/// Terminal configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Café name (displayed in the terminal header and on receipts).
    pub store_name: String,

    /// Currency symbol for display formatting only; all arithmetic stays
    /// in minor units.
    pub currency_symbol: String,

    /// Flat tax rate in basis points (250 = 2.5%).
    pub tax_rate_bps: u32,

    /// Payment method a fresh session starts on.
    pub default_method: PaymentMethod,

    /// Directory for the durable key-value files.
    pub data_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            store_name: "Till Cafe".to_string(),
            currency_symbol: "Rs ".to_string(),
            tax_rate_bps: 0,
            default_method: PaymentMethod::Cash,
            data_dir: default_data_dir(),
        }
    }
}

impl EngineConfig {
    /// Builds configuration from environment variables over defaults.
    ///
    /// ## Environment Variables
    /// - `TILL_STORE_NAME`: café name
    /// - `TILL_CURRENCY_SYMBOL`: display symbol (e.g. `"$"`)
    /// - `TILL_TAX_RATE`: flat percentage (e.g. `"2.5"`)
    /// - `TILL_PAYMENT_METHOD`: `cash` / `card` / `other`
    /// - `TILL_DATA_DIR`: override the durable storage directory
    pub fn from_env() -> Self {
        let mut config = EngineConfig::default();

        if let Ok(name) = std::env::var("TILL_STORE_NAME") {
            config.store_name = name;
        }

        if let Ok(symbol) = std::env::var("TILL_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Ok(rate) = std::env::var("TILL_TAX_RATE") {
            if let Ok(pct) = rate.parse::<f64>() {
                config.tax_rate_bps = TaxRate::from_percentage(pct).bps();
            }
        }

        if let Ok(method) = std::env::var("TILL_PAYMENT_METHOD") {
            if let Ok(method) = method.parse() {
                config.default_method = method;
            }
        }

        if let Ok(dir) = std::env::var("TILL_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config
    }

    /// The configured tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Formats an amount for display, e.g. `"Rs 13.20"`.
    pub fn format_currency(&self, amount: Money) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }
}

/// Per-user application data directory, e.g. `~/.local/share/till` on Linux.
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "till")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
