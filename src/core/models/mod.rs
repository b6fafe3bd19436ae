//! Domain models for Keystone rights
//!
//! Plain data carried between the repository and the rights logic. None of
//! these types know how they are stored.

pub mod environment;
pub mod project;
pub mod role;
pub mod user;


pub use environment::{Environment, EnvironmentType, RolesEnvironmentType, UserRight};
pub use project::{MemberRole, Organization, Project, ProjectMember};
pub use role::{Role, RoleLookup};
pub use user::User;

/// Role primary key
pub type RoleId = i32;
/// Environment type primary key
pub type EnvironmentTypeId = i32;
/// Environment primary key
pub type EnvironmentId = i32;
/// User primary key
pub type UserId = i32;
/// Project primary key
pub type ProjectId = i32;
/// Organization primary key
pub type OrganizationId = i32;
