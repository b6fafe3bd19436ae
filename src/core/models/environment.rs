//! Environment types, environments and the rights matrix row

use super::{EnvironmentId, EnvironmentTypeId, ProjectId, RoleId};
use crate::utils::error::KeystoneError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deployment environment category shared by all projects (dev, staging, prod)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvironmentType {
    pub id: EnvironmentTypeId,
    pub name: String,
}

impl EnvironmentType {
    pub fn new(id: EnvironmentTypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Concrete environment of a project, one per environment type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub id: EnvironmentId,
    pub name: String,
    pub project_id: ProjectId,
    pub environment_type_id: EnvironmentTypeId,
    /// Rotated whenever the secrets of the environment change
    pub version_id: String,
}

/// One cell of the rights matrix: what a role may do on an environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolesEnvironmentType {
    pub role_id: RoleId,
    pub environment_type_id: EnvironmentTypeId,
    pub read: bool,
    pub write: bool,
    pub invite: bool,
}

impl RolesEnvironmentType {
    pub fn new(
        role_id: RoleId,
        environment_type_id: EnvironmentTypeId,
        read: bool,
        write: bool,
        invite: bool,
    ) -> Self {
        Self {
            role_id,
            environment_type_id,
            read,
            write,
            invite,
        }
    }

    /// A row granting nothing
    pub fn denied(role_id: RoleId, environment_type_id: EnvironmentTypeId) -> Self {
        Self::new(role_id, environment_type_id, false, false, false)
    }

    /// Value of the matching boolean field
    pub fn allows(&self, right: UserRight) -> bool {
        match right {
            UserRight::Read => self.read,
            UserRight::Write => self.write,
            UserRight::Invite => self.invite,
        }
    }
}

/// What a member wants to do on an environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRight {
    Read,
    Write,
    Invite,
}

impl UserRight {
    pub const ALL: [UserRight; 3] = [UserRight::Read, UserRight::Write, UserRight::Invite];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRight::Read => "read",
            UserRight::Write => "write",
            UserRight::Invite => "invite",
        }
    }
}

impl FromStr for UserRight {
    type Err = KeystoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(UserRight::Read),
            "write" => Ok(UserRight::Write),
            "invite" => Ok(UserRight::Invite),
            other => Err(KeystoneError::unknown_right(other)),
        }
    }
}

impl fmt::Display for UserRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
