//! Configuration for the tokentally service.
//!
//! Configuration sources in order of precedence (later sources override earlier):
//! 1. Bundled defaults (tokentally.toml shipped with the crate)
//! 2. User config in home directory (~/.config/tokentally/tokentally.toml)
//! 3. User config in current directory (./tokentally.toml)
//! 4. An explicit file passed by the caller
//!
//! The cost multiplier is not part of this file. It is read from the
//! `BASE_RATIO` environment variable by `GlobalMultiplier::from_env`.

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokentally_core::{PricingEntry, PricingTable};
use tokentally_error::{ConfigError, TallyResult};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../tokentally.toml");

/// Transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Socket address the HTTP server binds to.
    pub bind: String,

    /// Per-request deadline in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,

    /// Maximum records of one batch processed at the same time.
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,
}

fn default_batch_concurrency() -> usize {
    8
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,

    /// Emit JSON lines instead of human-readable logs.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Top-level tokentally configuration.
///
/// # Example
///
/// ```no_run
/// use tokentally_server::TallyConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = TallyConfig::load()?;
/// println!("Binding to {}", config.server.bind);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TallyConfig {
    /// Transport settings.
    pub server: ServerSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Pricing entries that replace or extend the built-in table.
    #[serde(default)]
    pub pricing: HashMap<String, PricingEntry>,
}

impl TallyConfig {
    /// Load configuration from bundled defaults and user overrides.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be parsed.
    pub fn load() -> TallyResult<Self> {
        Self::load_with(None)
    }

    /// Load configuration, layering `path` over the default sources.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist or any source cannot be parsed.
    #[instrument(skip(path), fields(path = ?path.map(Path::display)))]
    pub fn load_with(path: Option<&Path>) -> TallyResult<Self> {
        debug!("Loading configuration with precedence: explicit > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/tokentally/tokentally.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("tokentally").required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the string cannot be parsed or fails validation.
    pub fn from_toml_str(toml: &str) -> TallyResult<Self> {
        let config: Self = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> TallyResult<()> {
        self.bind_addr()?;
        if self.server.batch_concurrency == 0 {
            return Err(ConfigError::new("server.batch_concurrency must be at least 1").into());
        }
        for (model, entry) in &self.pricing {
            let rates = [*entry.input_per_thousand(), *entry.output_per_thousand()];
            if rates.iter().any(|rate| !rate.is_finite() || *rate < 0.0) {
                return Err(ConfigError::new(format!(
                    "pricing for {} must be finite and non-negative",
                    model
                ))
                .into());
            }
        }
        Ok(())
    }

    /// The parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.bind` is not a socket address.
    pub fn bind_addr(&self) -> TallyResult<SocketAddr> {
        Ok(self.server.bind.parse().map_err(|e| {
            ConfigError::new(format!("Invalid bind address {}: {}", self.server.bind, e))
        })?)
    }

    /// The per-request deadline, if configured.
    pub fn deadline(&self) -> Option<Duration> {
        self.server.deadline_ms.map(Duration::from_millis)
    }

    /// Built-in prices with this configuration's entries applied.
    ///
    /// Without entries this is the shared built-in table.
    pub fn pricing_table(&self) -> Arc<PricingTable> {
        if self.pricing.is_empty() {
            PricingTable::shared()
        } else {
            Arc::new(PricingTable::with_overrides(&self.pricing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults() {
        let config = TallyConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.server.batch_concurrency, 8);
        assert!(config.deadline().is_none());
        assert_eq!(config.logging, LoggingSettings::default());
        assert!(config.pricing.is_empty());
    }

    #[test]
    fn test_rejects_bad_bind() {
        assert!(TallyConfig::from_toml_str("[server]\nbind = \"nowhere\"").is_err());
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        assert!(TallyConfig::from_toml_str("[server]\nbatch_concurrency = 0").is_err());
    }

    #[test]
    fn test_rejects_negative_price() {
        let toml = "[pricing.\"cheap\"]\ninput_per_thousand = -1.0\noutput_per_thousand = 1.0";
        assert!(TallyConfig::from_toml_str(toml).is_err());
    }
}
