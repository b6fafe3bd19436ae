//! Error types for Keystone rights

use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, KeystoneError>;

/// Main error type
///
/// A permission *denial* is never represented here: rights checks return
/// `Ok(false)` for that. Only [`KeystoneError::Forbidden`] carries a denial,
/// and only once a caller has decided to turn one into an error.
#[derive(Error, Debug)]
pub enum KeystoneError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record that had to exist is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// A denial converted into an error at the service boundary
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A right name that is not one of read, write or invite
    #[error("Unknown right: {0}")]
    UnknownRight(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict errors
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
