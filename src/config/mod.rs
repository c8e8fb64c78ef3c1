//! Configuration management module
//!
//! Environment-level settings for the gate: where the audit ledger lives and
//! how to authenticate against it. Per-workflow settings (trading mode) are
//! host signals, not configuration, and arrive via
//! [`crate::context::RunSignals`].

use crate::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the ledger base URL
pub const ENV_LEDGER_URL: &str = "TRADE_GATE_LEDGER_URL";

/// Environment variable overriding the ledger API key
pub const ENV_API_KEY: &str = "TRADE_GATE_API_KEY";

/// Main configuration structure for the safety gate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    /// Ledger/audit service configuration
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Ledger/audit service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Base URL of the ledger service; `None` falls back to the client's
    /// local default
    #[serde(default)]
    pub base_url: Option<String>,
    /// Service-level API key; `None` means user-id auth is mandatory
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds for the single audit POST
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GateConfig {
    /// Load configuration from a TOML file and apply environment overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| GateError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config: GateConfig = toml::from_str(&content)
            .map_err(|e| GateError::Config(format!("Failed to parse config: {}", e)))?;

        config.apply_env_overrides();

        Ok(config)
    }

    /// Build configuration purely from the process environment
    pub fn from_env() -> Self {
        let mut config = GateConfig::default();
        config.apply_env_overrides();
        config
    }

    /// Apply `TRADE_GATE_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_LEDGER_URL) {
            if !url.is_empty() {
                self.ledger.base_url = Some(url);
            }
        }
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            if !key.is_empty() {
                self.ledger.api_key = Some(key);
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.ledger.base_url {
            url::Url::parse(base_url)
                .map_err(|e| GateError::Config(format!("Invalid ledger base URL: {}", e)))?;
        }

        if self.ledger.timeout_secs == 0 {
            return Err(GateError::Config("Ledger timeout must be greater than 0".to_string()).into());
        }

        if let Some(api_key) = &self.ledger.api_key {
            if api_key.trim().is_empty() {
                return Err(
                    GateError::Config("Ledger API key must not be blank".to_string()).into(),
                );
            }
        }

        Ok(())
    }
}
