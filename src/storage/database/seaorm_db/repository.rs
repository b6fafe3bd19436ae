use crate::core::models::{
    EnvironmentTypeId, ProjectId, ProjectMember, Role, RoleId, RoleLookup, RolesEnvironmentType,
    UserId,
};
use crate::rights::RightsRepository;
use crate::utils::error::{KeystoneError, Result};
use async_trait::async_trait;

use super::types::SeaOrmDatabase;

#[async_trait]
impl RightsRepository for SeaOrmDatabase {
    async fn get_role(&self, lookup: RoleLookup) -> Result<Role> {
        self.find_role(&lookup)
            .await?
            .ok_or_else(|| KeystoneError::not_found(lookup.to_string()))
    }

    async fn get_roles(&self) -> Result<Vec<Role>> {
        self.list_roles().await
    }

    async fn get_children_roles(&self, role: &Role) -> Result<Vec<Role>> {
        Ok(self.role_graph().await?.children_of(role))
    }

    async fn get_roles_environment_type(
        &self,
        role_id: RoleId,
        environment_type_id: EnvironmentTypeId,
    ) -> Result<Option<RolesEnvironmentType>> {
        self.find_roles_environment_type(role_id, environment_type_id)
            .await
    }

    async fn get_project_member(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> Result<ProjectMember> {
        self.find_project_member(user_id, project_id)
            .await?
            .ok_or_else(|| {
                KeystoneError::not_found(format!(
                    "user #{} is not a member of project #{}",
                    user_id, project_id
                ))
            })
    }

    async fn get_project_owner(&self, project_id: ProjectId) -> Result<Option<UserId>> {
        self.get_project_owner_id(project_id).await
    }
}
