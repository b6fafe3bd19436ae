//! The data-access capability the rights logic depends on

use crate::core::models::{
    EnvironmentTypeId, ProjectId, ProjectMember, Role, RoleId, RoleLookup, RolesEnvironmentType,
    UserId,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only view over roles, the rights matrix and memberships
///
/// Implementations return `KeystoneError::NotFound` when a record that must
/// exist is missing, and `Ok(None)` where absence carries meaning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RightsRepository: Send + Sync {
    /// Find one role by ID or unique name
    async fn get_role(&self, lookup: RoleLookup) -> Result<Role>;

    /// All roles
    async fn get_roles(&self) -> Result<Vec<Role>>;

    /// Roles managed by `role`, transitively, excluding `role` itself
    async fn get_children_roles(&self, role: &Role) -> Result<Vec<Role>>;

    /// Rights matrix cell, `None` when no row is configured
    async fn get_roles_environment_type(
        &self,
        role_id: RoleId,
        environment_type_id: EnvironmentTypeId,
    ) -> Result<Option<RolesEnvironmentType>>;

    /// Membership of `user_id` in `project_id`, with its role loaded
    async fn get_project_member(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> Result<ProjectMember>;

    /// Owner of the organization owning the project, if the project has one
    async fn get_project_owner(&self, project_id: ProjectId) -> Result<Option<UserId>>;
}

#[async_trait]
impl<T: RightsRepository + ?Sized> RightsRepository for std::sync::Arc<T> {
    async fn get_role(&self, lookup: RoleLookup) -> Result<Role> {
        (**self).get_role(lookup).await
    }

    async fn get_roles(&self) -> Result<Vec<Role>> {
        (**self).get_roles().await
    }

    async fn get_children_roles(&self, role: &Role) -> Result<Vec<Role>> {
        (**self).get_children_roles(role).await
    }

    async fn get_roles_environment_type(
        &self,
        role_id: RoleId,
        environment_type_id: EnvironmentTypeId,
    ) -> Result<Option<RolesEnvironmentType>> {
        (**self)
            .get_roles_environment_type(role_id, environment_type_id)
            .await
    }

    async fn get_project_member(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> Result<ProjectMember> {
        (**self).get_project_member(user_id, project_id).await
    }

    async fn get_project_owner(&self, project_id: ProjectId) -> Result<Option<UserId>> {
        (**self).get_project_owner(project_id).await
    }
}
