//! Configuration data models

#![allow(missing_docs)]

pub mod keystone;
pub mod logging;
pub mod rights;
pub mod storage;

pub use keystone::*;
pub use logging::*;
pub use rights::*;
pub use storage::*;

/// Default database URL, a file next to the working directory
pub fn default_database_url() -> String {
    "sqlite://keystone.db?mode=rwc".to_string()
}

/// Default maximum database connections
pub fn default_max_connections() -> u32 {
    10
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

/// Default rights cache TTL in seconds
pub fn default_cache_ttl() -> u64 {
    300
}

/// Default number of cached entries per cache
pub fn default_cache_max_capacity() -> u64 {
    10_000
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
