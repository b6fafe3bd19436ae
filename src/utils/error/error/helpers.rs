//! Helper functions for creating specific error types

use super::types::KeystoneError;

impl KeystoneError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn unknown_right<S: Into<String>>(right: S) -> Self {
        Self::UnknownRight(right.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error means "the thing you asked about does not exist"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this error is a converted denial
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }
}

/// Turn a rights decision into an error at the boundary where a denial must
/// stop the request.
pub fn ensure_allowed<S: Into<String>>(allowed: bool, action: S) -> super::types::Result<()> {
    if allowed {
        Ok(())
    } else {
        Err(KeystoneError::Forbidden(action.into()))
    }
}
