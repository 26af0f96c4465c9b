//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use std::sync::Arc;
use tally_core::TallyError;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides (not committed)
    /// 4. Environment variables with `TALLY_` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, TallyError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, TallyError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), TallyError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, TallyError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("TALLY_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        // 1. Load default configuration
        let default_path = format!("{}/default.toml", config_dir);
        if Path::new(&default_path).exists() {
            debug!("Loading default config from: {}", default_path);
            builder = builder.add_source(File::with_name(&default_path).required(false));
        }

        // 2. Load environment-specific configuration
        let env_path = format!("{}/{}.toml", config_dir, environment);
        if Path::new(&env_path).exists() {
            debug!("Loading environment config from: {}", env_path);
            builder = builder.add_source(File::with_name(&env_path).required(false));
        }

        // 3. Load local overrides (not committed to version control)
        let local_path = format!("{}/local.toml", config_dir);
        if Path::new(&local_path).exists() {
            debug!("Loading local config from: {}", local_path);
            builder = builder.add_source(File::with_name(&local_path).required(false));
        }

        // 4. Override with environment variables (TALLY_ prefix)
        builder = builder.add_source(
            Environment::with_prefix("TALLY")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_tally_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_tally_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &AppConfig) -> Result<(), TallyError> {
        if config.database.host.is_empty() {
            return Err(TallyError::Configuration(
                "Database host is required".to_string(),
            ));
        }

        if config.database.database.is_empty() {
            return Err(TallyError::Configuration(
                "Database name is required".to_string(),
            ));
        }

        if config.redis.enabled && config.redis.host.is_empty() {
            return Err(TallyError::Configuration(
                "Redis host is required when Redis is enabled".to_string(),
            ));
        }

        if config.app.instance_name.is_empty() {
            return Err(TallyError::Configuration(
                "Instance name is required".to_string(),
            ));
        }

        Ok(())
    }
}

fn config_error_to_tally_error(err: ConfigError) -> TallyError {
    TallyError::Configuration(err.to_string())
}
