use crate::rights::cache::RightsEpoch;
use sea_orm::DatabaseConnection;

/// SeaORM-based database implementation
#[derive(Debug)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
    /// Backend type indicator
    pub(super) backend_type: DatabaseBackendType,
    /// Bumped after every committed change to roles or rights
    pub(super) rights_epoch: RightsEpoch,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}

/// Row counts of the rights tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseStats {
    pub roles: u64,
    pub environment_types: u64,
    pub rights_rows: u64,
    pub project_members: u64,
}
