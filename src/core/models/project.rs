//! Projects, organizations and memberships

use super::{OrganizationId, ProjectId, Role, RoleId, UserId};
use serde::{Deserialize, Serialize};

/// A project whose members share environment secrets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    /// Public identifier used by clients
    pub uuid: String,
    pub name: String,
    /// Owning organization
    pub organization_id: Option<OrganizationId>,
}

/// Organization owning projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    /// User who owns the organization. Their role on its projects is fixed.
    pub owner_id: UserId,
    #[serde(default)]
    pub paid: bool,
}

/// Association of a user with a project, carrying the user's role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub id: i32,
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub role_id: RoleId,
    pub role: Role,
}

/// One entry of an add-members request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRole {
    pub user_id: UserId,
    pub role_id: RoleId,
}

impl MemberRole {
    pub fn new(user_id: UserId, role_id: RoleId) -> Self {
        Self { user_id, role_id }
    }
}
