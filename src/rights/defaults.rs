//! Reference roles, environment types and rights
//!
//! This is the data every Keystone deployment is seeded with. IDs follow
//! insertion order of a fresh database.

use crate::core::models::{EnvironmentType, Role, RolesEnvironmentType};

pub const ADMIN: &str = "admin";
pub const DEVOPS: &str = "devops";
pub const LEAD_DEV: &str = "lead-dev";
pub const DEVELOPER: &str = "developer";

pub const DEV: &str = "dev";
pub const STAGING: &str = "staging";
pub const PROD: &str = "prod";

/// Role definition used for seeding
#[derive(Debug, Clone, Copy)]
pub struct RoleSeed {
    pub name: &'static str,
    pub description: &'static str,
    /// Managing role, must appear earlier in [`ROLES`]
    pub parent: Option<&'static str>,
    pub can_add_member: bool,
}

/// Rights definition used for seeding
#[derive(Debug, Clone, Copy)]
pub struct RightsSeed {
    pub role: &'static str,
    pub environment_type: &'static str,
    pub read: bool,
    pub write: bool,
    pub invite: bool,
}

/// Roles, top of the hierarchy first
pub const ROLES: [RoleSeed; 4] = [
    RoleSeed {
        name: ADMIN,
        description: "Manages every member and every environment",
        parent: None,
        can_add_member: true,
    },
    RoleSeed {
        name: DEVOPS,
        description: "Handles every environment, manages everyone but admins",
        parent: Some(ADMIN),
        can_add_member: true,
    },
    RoleSeed {
        name: LEAD_DEV,
        description: "Works on dev and manages developers",
        parent: Some(DEVOPS),
        can_add_member: true,
    },
    RoleSeed {
        name: DEVELOPER,
        description: "Works on dev",
        parent: Some(LEAD_DEV),
        can_add_member: false,
    },
];

pub const ENVIRONMENT_TYPES: [&str; 3] = [DEV, STAGING, PROD];

const fn rights(
    role: &'static str,
    environment_type: &'static str,
    read: bool,
    write: bool,
    invite: bool,
) -> RightsSeed {
    RightsSeed {
        role,
        environment_type,
        read,
        write,
        invite,
    }
}

pub const RIGHTS: [RightsSeed; 12] = [
    rights(ADMIN, DEV, true, true, true),
    rights(ADMIN, STAGING, true, true, true),
    rights(ADMIN, PROD, true, true, true),
    rights(DEVOPS, DEV, true, true, true),
    rights(DEVOPS, STAGING, true, true, true),
    rights(DEVOPS, PROD, true, true, true),
    rights(LEAD_DEV, DEV, true, true, true),
    rights(LEAD_DEV, STAGING, false, false, false),
    rights(LEAD_DEV, PROD, false, false, false),
    rights(DEVELOPER, DEV, true, true, false),
    rights(DEVELOPER, STAGING, false, false, false),
    rights(DEVELOPER, PROD, false, false, false),
];

fn role_id(name: &str) -> i32 {
    ROLES
        .iter()
        .position(|seed| seed.name == name)
        .map_or(0, |index| index as i32 + 1)
}

fn environment_type_id(name: &str) -> i32 {
    ENVIRONMENT_TYPES
        .iter()
        .position(|seed| *seed == name)
        .map_or(0, |index| index as i32 + 1)
}

/// The seeded roles with the IDs a fresh database assigns them
pub fn reference_roles() -> Vec<Role> {
    ROLES
        .iter()
        .map(|seed| Role {
            id: role_id(seed.name),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            parent_id: seed.parent.map(role_id),
            can_add_member: seed.can_add_member,
        })
        .collect()
}

/// The seeded environment types with their IDs
pub fn reference_environment_types() -> Vec<EnvironmentType> {
    ENVIRONMENT_TYPES
        .iter()
        .map(|name| EnvironmentType::new(environment_type_id(name), *name))
        .collect()
}

/// The seeded rights matrix with resolved IDs
pub fn reference_rights() -> Vec<RolesEnvironmentType> {
    RIGHTS
        .iter()
        .map(|seed| RolesEnvironmentType {
            role_id: role_id(seed.role),
            environment_type_id: environment_type_id(seed.environment_type),
            read: seed.read,
            write: seed.write,
            invite: seed.invite,
        })
        .collect()
}
