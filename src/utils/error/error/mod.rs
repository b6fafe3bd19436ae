//! Error handling for Keystone rights
//!
//! This module defines all error types used throughout the crate.

#![allow(missing_docs)]

mod conversions;
mod helpers;
mod response;
mod types;

pub use helpers::ensure_allowed;
pub use response::{ErrorDetail, ErrorResponse};
pub use types::{KeystoneError, Result};
