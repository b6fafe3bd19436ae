//! Top-level Keystone configuration

#![allow(missing_docs)]

use super::*;
use crate::utils::error::{KeystoneError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Everything the rights service can be configured with
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KeystoneConfig {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Role assignment and cache behavior
    #[serde(default)]
    pub rights: RightsConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl KeystoneConfig {
    /// Build from `KEYSTONE_*` environment variables, defaults for the rest
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().with_vars(var)
    }

    /// Apply `KEYSTONE_*` environment variables on top of this configuration
    pub fn with_env(self) -> Result<Self> {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Override every field whose variable is set, even with its default value
    pub fn with_vars<F>(self, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self;

        if let Some(url) = var("KEYSTONE_DATABASE_URL") {
            config.storage.database.url = url;
        }
        if let Some(value) = parse_var(&var, "KEYSTONE_DATABASE_MAX_CONNECTIONS")? {
            config.storage.database.max_connections = value;
        }
        if let Some(value) = parse_var(&var, "KEYSTONE_DATABASE_CONNECTION_TIMEOUT")? {
            config.storage.database.connection_timeout = value;
        }
        if let Some(value) = parse_var(&var, "KEYSTONE_SAME_ROLE_ASSIGNMENT")? {
            config.rights.same_role_assignment = value;
        }
        if let Some(value) = parse_var(&var, "KEYSTONE_SEED_DEFAULTS")? {
            config.rights.seed_defaults = value;
        }
        if let Some(value) = parse_var(&var, "KEYSTONE_CACHE_ENABLED")? {
            config.rights.cache.enabled = value;
        }
        if let Some(value) = parse_var(&var, "KEYSTONE_CACHE_TTL")? {
            config.rights.cache.ttl = value;
        }
        if let Some(value) = parse_var(&var, "KEYSTONE_CACHE_MAX_CAPACITY")? {
            config.rights.cache.max_capacity = value;
        }
        if let Some(level) = var("KEYSTONE_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(value) = parse_var(&var, "KEYSTONE_LOG_JSON")? {
            config.logging.json = value;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    ///
    /// A field of `other` left at its default value counts as unset and
    /// keeps the value from `self`. Use [`Self::with_vars`] to force one.
    pub fn merge(mut self, other: Self) -> Self {
        self.storage = self.storage.merge(other.storage);
        self.rights = self.rights.merge(other.rights);
        self.logging = self.logging.merge(other.logging);
        self
    }
}

fn parse_var<F, T>(var: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| KeystoneError::config(format!("Invalid {}={:?}: {}", key, raw, e))),
        None => Ok(None),
    }
}
