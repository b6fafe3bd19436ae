//! Configuration validation
//!
//! - `trait_def`: the `Validate` trait
//! - `config_validators`: top-level, rights and logging validators
//! - `storage_validators`: database validators

mod config_validators;
mod storage_validators;
mod trait_def;

pub use trait_def::Validate;
