//! Project membership changes
//!
//! Every operation asks the member guard first and only then writes. A
//! refusal surfaces as `KeystoneError::Forbidden` and leaves the project
//! untouched.

use crate::config::RightsConfig;
use crate::core::models::{MemberRole, Project, Role, RoleLookup, User, UserId};
use crate::rights::{AssignmentPolicy, MemberGuard, RightsRepository};
use crate::storage::StorageLayer;
use crate::storage::database::Database;
use crate::utils::error::{Result, ensure_allowed};
use std::sync::Arc;
use tracing::info;

/// Checked membership writes
#[derive(Clone)]
pub struct MembershipService {
    database: Arc<Database>,
    rights: Arc<dyn RightsRepository>,
    policy: AssignmentPolicy,
}

impl MembershipService {
    pub fn new(
        database: Arc<Database>,
        rights: Arc<dyn RightsRepository>,
        policy: AssignmentPolicy,
    ) -> Self {
        Self {
            database,
            rights,
            policy,
        }
    }

    pub fn from_storage(storage: &StorageLayer, config: &RightsConfig) -> Self {
        Self::new(
            Arc::clone(&storage.database),
            Arc::clone(&storage.rights),
            config.assignment_policy(),
        )
    }

    fn guard(&self) -> MemberGuard<'_, dyn RightsRepository> {
        MemberGuard::new(self.rights.as_ref()).with_policy(self.policy)
    }

    /// Add members to `project`, or change the role of existing ones
    pub async fn add_members(
        &self,
        acting_user: &User,
        project: &Project,
        members: &[MemberRole],
    ) -> Result<()> {
        let allowed = self
            .guard()
            .can_user_add_members(acting_user, project, members)
            .await?;
        ensure_allowed(
            allowed,
            format!(
                "user #{} cannot add these members to project #{}",
                acting_user.id, project.id
            ),
        )?;

        self.database.project_add_members(project.id, members).await?;
        info!(
            "User #{} added {} member(s) to project #{}",
            acting_user.id,
            members.len(),
            project.id
        );
        Ok(())
    }

    /// Remove members from `project`, returning how many were removed
    pub async fn remove_members(
        &self,
        acting_user: &User,
        project: &Project,
        user_ids: &[UserId],
    ) -> Result<u64> {
        let allowed = self
            .guard()
            .can_user_remove_members(acting_user, project, user_ids)
            .await?;
        ensure_allowed(
            allowed,
            format!(
                "user #{} cannot remove these members from project #{}",
                acting_user.id, project.id
            ),
        )?;

        self.database
            .project_remove_members(project.id, user_ids)
            .await
    }

    /// Give `target_user` the role named `role_name` on `project`
    pub async fn set_member_role(
        &self,
        acting_user: &User,
        target_user: &User,
        role_name: &str,
        project: &Project,
    ) -> Result<Role> {
        let role = self.rights.get_role(RoleLookup::name(role_name)).await?;

        let allowed = self
            .guard()
            .can_user_set_member_role(acting_user, target_user, &role, project)
            .await?;
        ensure_allowed(
            allowed,
            format!(
                "user #{} cannot give {} to user #{} on project #{}",
                acting_user.id, role, target_user.id, project.id
            ),
        )?;

        self.database
            .project_set_role_for_user(project.id, target_user.id, role.id)
            .await?;
        info!(
            "User #{} gave {} to user #{} on project #{}",
            acting_user.id, role, target_user.id, project.id
        );
        Ok(role)
    }

    /// Roles `acting_user` may hand out on `project`
    pub async fn assignable_roles(&self, acting_user: &User, project: &Project) -> Result<Vec<Role>> {
        self.guard()
            .roles_member_can_assign(acting_user, project)
            .await
    }
}
