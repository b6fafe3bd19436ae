//! # Keystone Rights
//!
//! Role hierarchy and environment rights for Keystone projects.
//!
//! A project member holds exactly one role. Roles form a hierarchy
//! (admin > devops > lead-dev > developer by default) that decides who may
//! manage whom, and a per environment type matrix decides who may read,
//! write or invite on each environment.
//!
//! ## Checking rights
//!
//! ```rust,no_run
//! use keystone_rights::{Config, StorageLayer, rights};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let storage = StorageLayer::new(&config.keystone).await?;
//!
//!     let user = storage.database.get_user(1).await?;
//!     let project = storage.database.get_project(1).await?;
//!     let environment = storage.database.get_environment(1).await?;
//!
//!     let allowed = rights::can_user_read_environment(
//!         storage.rights.as_ref(),
//!         &user,
//!         &project,
//!         &environment,
//!     )
//!     .await?;
//!     println!("read allowed: {}", allowed);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod config;
pub mod core;
pub mod rights;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::models::{
    Environment, EnvironmentType, MemberRole, Organization, Project, ProjectMember, Role,
    RoleLookup, RolesEnvironmentType, User, UserRight,
};
pub use rights::{AssignmentPolicy, CachedRightsRepository, MemberGuard, RightsRepository};
pub use services::MembershipService;
pub use storage::StorageLayer;
pub use storage::database::Database;
pub use utils::error::{KeystoneError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
