//! Top-level configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

impl Validate for KeystoneConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating keystone configuration");

        self.storage.validate()?;
        self.rights.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl Validate for RightsConfig {
    fn validate(&self) -> Result<(), String> {
        self.cache.validate()
    }
}

impl Validate for RightsCacheConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }

        if self.ttl == 0 {
            return Err("Rights cache TTL must be greater than 0".to_string());
        }

        if self.max_capacity == 0 {
            return Err("Rights cache capacity must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }

        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))
    }
}
