//! Host configuration management.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::types::Address;

/// Prefix for environment overrides, e.g. `LPLEDGER__LEDGER__OWNER`.
pub const ENV_PREFIX: &str = "LPLEDGER";

/// Host configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Ledger deployment configuration.
    pub ledger: LedgerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Ledger deployment configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Identity designated as owner at construction.
    pub owner: Address,
    /// Callers granted by the owner right after construction.
    #[serde(default)]
    pub allowed_callers: Vec<Address>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "lpledger=info".to_string()
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("ledger.allowed_callers")
        .try_parsing(true)
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}`, then `LPLEDGER__*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(environment())
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Builds configuration from an inline TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed or is invalid.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects absent identities.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.owner.is_nil() {
            return Err(ConfigError::Message(
                "ledger.owner must not be the nil address".to_string(),
            ));
        }
        if self.ledger.allowed_callers.iter().any(Address::is_nil) {
            return Err(ConfigError::Message(
                "ledger.allowed_callers must not contain the nil address".to_string(),
            ));
        }
        Ok(())
    }
}
