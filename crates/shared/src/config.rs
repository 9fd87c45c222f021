//! Application configuration management.

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::amount::DEFAULT_MINOR_UNIT_SCALE;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Ledger configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// ISO 4217 code of the single ledger currency per tenant.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Minor-unit scale for monetary amounts (2 = cents).
    #[serde(default = "default_minor_unit_scale")]
    pub minor_unit_scale: u32,
    /// Timeout in milliseconds for posting/closing lock acquisition.
    /// Contention past this window surfaces a retryable Busy error.
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
    /// Optional path to a chart-of-accounts JSON file imported at startup.
    #[serde(default)]
    pub chart_path: Option<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            minor_unit_scale: default_minor_unit_scale(),
            lock_timeout_ms: default_lock_timeout_ms(),
            chart_path: None,
        }
    }
}

fn default_currency() -> String {
    "COP".to_string()
}

fn default_minor_unit_scale() -> u32 {
    DEFAULT_MINOR_UNIT_SCALE
}

fn default_lock_timeout_ms() -> u64 {
    5000
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// [`AppError::Configuration`] when a source cannot be read or the
    /// merged configuration does not deserialize.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()
            .map_err(|e| AppError::Configuration(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Configuration(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig {
            server: ServerConfig::default(),
            ledger: LedgerConfig::default(),
        };
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ledger.minor_unit_scale, 2);
        assert_eq!(config.ledger.lock_timeout_ms, 5000);
        assert!(config.ledger.chart_path.is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AppConfig =
            serde_json::from_str(r#"{"ledger": {"minor_unit_scale": 0}}"#).unwrap();
        assert_eq!(config.ledger.minor_unit_scale, 0);
        assert_eq!(config.ledger.currency, "COP");
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
