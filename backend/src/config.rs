//! Configuration management for the Inventory Ledger platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with the INV__ prefix

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Persistence configuration
    pub storage: StorageConfig,

    /// JWT authentication configuration
    pub jwt: JwtConfig,

    /// Order ledger behavior
    pub ledger: LedgerConfig,

    /// Log output
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

/// Which collection store backs the services
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Directory holding one JSON file per collection (file backend only)
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWT tokens
    pub secret: String,

    /// Access token expiration in seconds
    pub access_token_expiry: i64,
}

/// How order updates treat a changed item list when the stock-relevant
/// status did not change
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemChangePolicy {
    /// Leave stock as is; the new item list is stored without adjustment
    #[default]
    Preserve,
    /// Apply the per-product difference between the old and new item lists
    Reconcile,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct LedgerConfig {
    pub item_change_policy: ItemChangePolicy,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("INV_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("storage.backend", "file")?
            .set_default("storage.data_dir", "data")?
            .set_default("jwt.secret", "development-secret-key")?
            .set_default("jwt.access_token_expiry", 86400)?
            .set_default("ledger.item_change_policy", "preserve")?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (INV__ prefix)
            .add_source(
                Environment::with_prefix("INV")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.environment == "production" && self.jwt.secret == "development-secret-key" {
            return Err(ConfigError::Message(
                "jwt.secret must be set in production".to_string(),
            ));
        }
        if self.jwt.access_token_expiry <= 0 {
            return Err(ConfigError::Message(
                "jwt.access_token_expiry must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// In-memory configuration for tests and throwaway runs
    pub fn ephemeral() -> Self {
        Self {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                data_dir: PathBuf::from("data"),
            },
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                access_token_expiry: 3600,
            },
            ledger: LedgerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
