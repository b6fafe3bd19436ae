// Module declarations
mod types;
mod connection;
mod role_ops;
mod rights_ops;
mod project_ops;
mod member_ops;
mod seed_ops;
mod repository;

// Re-export public types
pub use seed_ops::SeedReport;
pub use types::{DatabaseBackendType, DatabaseStats, SeaOrmDatabase};
