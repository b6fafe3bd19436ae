//! Configuration management
//!
//! Configuration comes from a YAML file, `KEYSTONE_*` environment variables,
//! or both merged (environment taking precedence).

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{KeystoneError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Keystone configuration
    pub keystone: KeystoneConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| KeystoneError::Config(format!("Failed to read config file: {}", e)))?;

        let keystone: KeystoneConfig = serde_yaml::from_str(&content)
            .map_err(|e| KeystoneError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { keystone };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let keystone = KeystoneConfig::from_env()?;
        let config = Self { keystone };

        config.validate()?;
        Ok(config)
    }

    /// Load `path` when given, then apply environment overrides
    ///
    /// Every `KEYSTONE_*` variable that is set wins over the file, including
    /// one set to the default value.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let keystone = match path {
            Some(path) => Self::from_file(path).await?.keystone,
            None => KeystoneConfig::default(),
        };

        let config = Self {
            keystone: keystone.with_env()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.keystone.storage
    }

    /// Get database configuration
    pub fn database(&self) -> &DatabaseConfig {
        &self.keystone.storage.database
    }

    /// Get rights configuration
    pub fn rights(&self) -> &RightsConfig {
        &self.keystone.rights
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.keystone.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.keystone
            .storage
            .validate()
            .map_err(|e| KeystoneError::Config(format!("Storage config error: {}", e)))?;

        self.keystone
            .rights
            .validate()
            .map_err(|e| KeystoneError::Config(format!("Rights config error: {}", e)))?;

        self.keystone
            .logging
            .validate()
            .map_err(|e| KeystoneError::Config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence, except for
    /// fields it leaves at their default)
    pub fn merge(mut self, other: Self) -> Self {
        self.keystone = self.keystone.merge(other.keystone);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.keystone)
            .map_err(|e| KeystoneError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
