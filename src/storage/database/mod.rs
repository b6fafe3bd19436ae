//! Database storage implementation using SeaORM
//!
//! Tables for roles, environment types, the rights matrix, users,
//! organizations, projects, environments and project members.

/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;
/// SeaORM database implementation module
pub mod seaorm_db;

// Re-export the main database interface
pub use seaorm_db::SeaOrmDatabase as Database;
pub use seaorm_db::{DatabaseBackendType, DatabaseStats, SeedReport};
