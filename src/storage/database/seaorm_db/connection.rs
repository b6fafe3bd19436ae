use crate::config::DatabaseConfig;
use crate::rights::cache::RightsEpoch;
use crate::utils::error::{KeystoneError, Result};
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::super::entities;
use super::super::migration::Migrator;
use super::types::{DatabaseBackendType, DatabaseStats, SeaOrmDatabase};

impl SeaOrmDatabase {
    /// Create a new database connection, running migrations when enabled
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let db = Self::try_connect(&config.url, config).await?;
        let backend_type = if config.is_sqlite() {
            DatabaseBackendType::SQLite
        } else {
            DatabaseBackendType::PostgreSQL
        };
        info!("Database connection established ({:?})", backend_type);

        let database = Self {
            db,
            backend_type,
            rights_epoch: RightsEpoch::new(),
        };
        if config.enabled {
            database.migrate().await?;
        }

        Ok(database)
    }

    /// Try to connect to a database
    async fn try_connect(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url.to_string());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(KeystoneError::Database)
    }

    /// Epoch bumped by every role or rights write, for caches built on top
    pub fn rights_epoch(&self) -> RightsEpoch {
        self.rights_epoch.clone()
    }

    /// Get the current backend type
    pub fn backend_type(&self) -> DatabaseBackendType {
        self.backend_type
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            KeystoneError::Database(e)
        })?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Close the database connection
    pub async fn close(self) -> Result<()> {
        self.db.close().await.map_err(KeystoneError::Database)?;
        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        debug!("Performing database health check");

        let _result = entities::Role::find()
            .limit(1)
            .all(&self.db)
            .await
            .map_err(KeystoneError::Database)?;

        debug!("Database health check passed");
        Ok(())
    }

    /// Row counts of the rights tables
    pub async fn stats(&self) -> Result<DatabaseStats> {
        Ok(DatabaseStats {
            roles: entities::Role::find().count(&self.db).await?,
            environment_types: entities::EnvironmentType::find().count(&self.db).await?,
            rights_rows: entities::RolesEnvironmentType::find().count(&self.db).await?,
            project_members: entities::ProjectMember::find().count(&self.db).await?,
        })
    }
}
