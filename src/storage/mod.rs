//! Storage layer
//!
//! Persistence of roles, rights and memberships.

/// Database storage module
pub mod database;

use crate::config::KeystoneConfig;
use crate::rights::{CachedRightsRepository, RightsRepository};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Database handle plus the repository the rights checks read through
#[derive(Clone)]
pub struct StorageLayer {
    /// Database connection pool
    pub database: Arc<database::Database>,
    /// Repository for rights checks, cached when configured. The cache
    /// follows every role or rights write made through `database`.
    pub rights: Arc<dyn RightsRepository>,
}

impl StorageLayer {
    /// Connect, migrate and optionally seed according to `config`
    pub async fn new(config: &KeystoneConfig) -> Result<Self> {
        info!("Initializing storage layer");

        debug!("Connecting to database");
        let database = Arc::new(database::Database::new(&config.storage.database).await?);

        if config.rights.seed_defaults {
            database.seed_default_rights().await?;
        }

        let rights: Arc<dyn RightsRepository> = if config.rights.cache.enabled {
            debug!("Rights cache enabled (ttl {}s)", config.rights.cache.ttl);
            Arc::new(
                CachedRightsRepository::new(Arc::clone(&database), &config.rights.cache)
                    .with_epoch(database.rights_epoch()),
            )
        } else {
            database.clone()
        };

        info!("Storage layer initialized successfully");
        Ok(Self { database, rights })
    }

    /// Health check for all storage backends
    pub async fn health_check(&self) -> Result<()> {
        self.database.health_check().await
    }
}
