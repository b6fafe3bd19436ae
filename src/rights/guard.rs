//! Member mutation guard
//!
//! Decides whether an acting member may grant a role, change another
//! member's role, add members or remove them. A role "dominates" another
//! when the other role is one of its children, or is the same role and the
//! assignment policy allows same-role assignment. Roles whose
//! `can_add_member` flag is off dominate nothing.

use super::repository::RightsRepository;
use crate::core::models::{MemberRole, Project, ProjectMember, Role, RoleLookup, User, UserId};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunables of the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPolicy {
    /// Whether a role may grant (and therefore manage) its own role
    pub allow_same_role: bool,
}

impl Default for AssignmentPolicy {
    fn default() -> Self {
        Self {
            allow_same_role: true,
        }
    }
}

/// Membership checks bound to a repository
pub struct MemberGuard<'a, R: ?Sized> {
    repo: &'a R,
    policy: AssignmentPolicy,
}

impl<'a, R: RightsRepository + ?Sized> MemberGuard<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self {
            repo,
            policy: AssignmentPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AssignmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> AssignmentPolicy {
        self.policy
    }

    /// Whether a member holding `acting` may grant `target`
    pub async fn can_role_add_role(&self, acting: &Role, target: &Role) -> Result<bool> {
        if !acting.can_add_member {
            return Ok(false);
        }

        // Decided before touching the hierarchy
        if acting.is_same_role(target) {
            return Ok(self.policy.allow_same_role);
        }

        let children = self.repo.get_children_roles(acting).await?;
        Ok(children.iter().any(|child| child.is_same_role(target)))
    }

    /// Whether `acting_user` may give `new_role` to `target_user` on `project`
    ///
    /// The acting role must dominate both the target's current role and the
    /// new one. The owner of the project's organization keeps their role.
    pub async fn can_user_set_member_role(
        &self,
        acting_user: &User,
        target_user: &User,
        new_role: &Role,
        project: &Project,
    ) -> Result<bool> {
        let acting = self.member(acting_user.id, project).await?;
        let target = self.member(target_user.id, project).await?;

        if !self.can_role_add_role(&acting.role, &target.role).await? {
            debug!(
                "{} cannot manage member #{} holding {}",
                acting.role, target.user_id, target.role
            );
            return Ok(false);
        }

        if !self.can_role_add_role(&acting.role, new_role).await? {
            debug!("{} cannot grant {}", acting.role, new_role);
            return Ok(false);
        }

        if self.is_project_owner(target_user.id, project).await? {
            debug!(
                "User #{} owns the organization of project #{}, role is fixed",
                target_user.id, project.id
            );
            return Ok(false);
        }

        Ok(true)
    }

    /// Whether `acting_user` may add someone to `project` with `role`
    pub async fn can_user_add_member_with_role(
        &self,
        acting_user: &User,
        role: &Role,
        project: &Project,
    ) -> Result<bool> {
        let acting = self.member(acting_user.id, project).await?;
        self.can_role_add_role(&acting.role, role).await
    }

    /// Whether every entry of an add-members batch is permitted
    ///
    /// One refused entry refuses the whole batch. An entry naming a current
    /// member changes their role, so the acting role must also dominate the
    /// role they hold now.
    pub async fn can_user_add_members(
        &self,
        acting_user: &User,
        project: &Project,
        members: &[MemberRole],
    ) -> Result<bool> {
        let acting = self.member(acting_user.id, project).await?;
        let owner = self.repo.get_project_owner(project.id).await?;

        for member in members {
            if owner == Some(member.user_id) {
                debug!(
                    "User #{} owns the organization of project #{}, role is fixed",
                    member.user_id, project.id
                );
                return Ok(false);
            }

            let role = self.repo.get_role(RoleLookup::Id(member.role_id)).await?;
            if !self.can_role_add_role(&acting.role, &role).await? {
                debug!(
                    "{} cannot add user #{} as {}",
                    acting.role, member.user_id, role
                );
                return Ok(false);
            }

            // Adding an existing member replaces their role
            if let Some(existing) = self.existing_member(member.user_id, project).await? {
                if !self.can_role_add_role(&acting.role, &existing.role).await? {
                    debug!(
                        "{} cannot re-add member #{} holding {}",
                        acting.role, member.user_id, existing.role
                    );
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }

    /// Whether every listed member may be removed from `project`
    ///
    /// Removing uses the same dominance rule as granting, applied to the
    /// member's current role.
    pub async fn can_user_remove_members(
        &self,
        acting_user: &User,
        project: &Project,
        user_ids: &[UserId],
    ) -> Result<bool> {
        let acting = self.member(acting_user.id, project).await?;
        let owner = self.repo.get_project_owner(project.id).await?;

        for user_id in user_ids {
            if owner == Some(*user_id) {
                debug!("Organization owner #{} cannot be removed", user_id);
                return Ok(false);
            }

            let target = self.member(*user_id, project).await?;
            if !self.can_role_add_role(&acting.role, &target.role).await? {
                debug!(
                    "{} cannot remove member #{} holding {}",
                    acting.role, user_id, target.role
                );
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Whether `acting_user` dominates the current role of `target_user`
    pub async fn can_user_manage_member(
        &self,
        acting_user: &User,
        target_user: &User,
        project: &Project,
    ) -> Result<bool> {
        let acting = self.member(acting_user.id, project).await?;
        let target = self.member(target_user.id, project).await?;
        self.can_role_add_role(&acting.role, &target.role).await
    }

    /// Roles `acting_user` may hand out on `project`: their own (when the
    /// policy allows it) followed by the roles below it
    pub async fn roles_member_can_assign(
        &self,
        acting_user: &User,
        project: &Project,
    ) -> Result<Vec<Role>> {
        let acting = self.member(acting_user.id, project).await?;
        if !acting.role.can_add_member {
            return Ok(Vec::new());
        }

        let mut roles = Vec::new();
        if self.policy.allow_same_role {
            roles.push(acting.role.clone());
        }
        roles.extend(self.repo.get_children_roles(&acting.role).await?);

        Ok(roles)
    }

    async fn member(&self, user_id: UserId, project: &Project) -> Result<ProjectMember> {
        self.repo.get_project_member(user_id, project.id).await
    }

    /// Membership of `user_id`, `None` when they are not a member yet
    async fn existing_member(
        &self,
        user_id: UserId,
        project: &Project,
    ) -> Result<Option<ProjectMember>> {
        match self.repo.get_project_member(user_id, project.id).await {
            Ok(member) => Ok(Some(member)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn is_project_owner(&self, user_id: UserId, project: &Project) -> Result<bool> {
        let owner = self.repo.get_project_owner(project.id).await?;
        Ok(owner == Some(user_id))
    }
}

/// [`MemberGuard::can_role_add_role`] with the default policy
pub async fn can_role_add_role<R: RightsRepository + ?Sized>(
    repo: &R,
    acting: &Role,
    target: &Role,
) -> Result<bool> {
    MemberGuard::new(repo).can_role_add_role(acting, target).await
}

/// [`MemberGuard::can_user_set_member_role`] with the default policy
pub async fn can_user_set_member_role<R: RightsRepository + ?Sized>(
    repo: &R,
    acting_user: &User,
    target_user: &User,
    new_role: &Role,
    project: &Project,
) -> Result<bool> {
    MemberGuard::new(repo)
        .can_user_set_member_role(acting_user, target_user, new_role, project)
        .await
}
