//! HTTP response handling for errors
//!
//! Controllers translate `Ok(false)` from a rights check into 403 on their
//! own; everything that reaches this mapping is already an error.

use super::types::KeystoneError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl KeystoneError {
    /// Machine readable code sent alongside the status
    pub fn error_code(&self) -> &'static str {
        match self {
            KeystoneError::NotFound(_) => "NOT_FOUND",
            KeystoneError::Forbidden(_) => "FORBIDDEN",
            KeystoneError::Validation(_) => "VALIDATION_ERROR",
            KeystoneError::Conflict(_) => "CONFLICT",
            KeystoneError::Config(_) => "CONFIG_ERROR",
            KeystoneError::Database(_) => "DATABASE_ERROR",
            KeystoneError::UnknownRight(_) => "UNKNOWN_RIGHT",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for KeystoneError {
    fn status_code(&self) -> StatusCode {
        match self {
            KeystoneError::NotFound(_) => StatusCode::NOT_FOUND,
            KeystoneError::Forbidden(_) => StatusCode::FORBIDDEN,
            KeystoneError::Validation(_) => StatusCode::BAD_REQUEST,
            KeystoneError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            KeystoneError::Database(_) => "Database operation failed".to_string(),
            KeystoneError::NotFound(_)
            | KeystoneError::Forbidden(_)
            | KeystoneError::Validation(_)
            | KeystoneError::Conflict(_) => self.to_string(),
            _ => "An internal error occurred".to_string(),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                request_id: None,
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}
