use crate::core::models::{MemberRole, ProjectId, ProjectMember, RoleId, UserId};
use crate::utils::error::{KeystoneError, Result};
use sea_orm::*;
use tracing::{debug, info};

use super::super::entities::{self, project_member};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Membership of a user in a project, with its role loaded
    pub async fn find_project_member(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> Result<Option<ProjectMember>> {
        debug!("Finding membership of user #{} in project #{}", user_id, project_id);

        let found = entities::ProjectMember::find()
            .filter(project_member::Column::UserId.eq(user_id))
            .filter(project_member::Column::ProjectId.eq(project_id))
            .find_also_related(entities::Role)
            .one(&self.db)
            .await?;

        match found {
            Some((member, Some(role))) => Ok(Some(member.to_domain_member(&role))),
            Some((member, None)) => Err(KeystoneError::internal(format!(
                "Membership #{} references missing role #{}",
                member.id, member.role_id
            ))),
            None => Ok(None),
        }
    }

    /// Every member of a project, ordered by user ID
    pub async fn list_project_members(&self, project_id: ProjectId) -> Result<Vec<ProjectMember>> {
        let rows = entities::ProjectMember::find()
            .filter(project_member::Column::ProjectId.eq(project_id))
            .order_by_asc(project_member::Column::UserId)
            .find_also_related(entities::Role)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(member, role)| {
                role.map(|role| member.to_domain_member(&role)).ok_or_else(|| {
                    KeystoneError::internal(format!(
                        "Membership #{} references missing role #{}",
                        member.id, member.role_id
                    ))
                })
            })
            .collect()
    }

    /// Add members or change their role, all or nothing
    ///
    /// Existing memberships of the same user in the project are updated in
    /// place. No rights are checked here.
    pub async fn project_add_members(
        &self,
        project_id: ProjectId,
        members: &[MemberRole],
    ) -> Result<()> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now();

        for member in members {
            if entities::Role::find_by_id(member.role_id)
                .one(&txn)
                .await?
                .is_none()
            {
                return Err(KeystoneError::not_found(format!("role #{}", member.role_id)));
            }

            let existing = entities::ProjectMember::find()
                .filter(project_member::Column::UserId.eq(member.user_id))
                .filter(project_member::Column::ProjectId.eq(project_id))
                .one(&txn)
                .await?;

            match existing {
                Some(model) => {
                    let mut active_model: project_member::ActiveModel = model.into();
                    active_model.role_id = Set(member.role_id);
                    active_model.updated_at = Set(now.into());
                    active_model.update(&txn).await?;
                }
                None => {
                    project_member::ActiveModel {
                        user_id: Set(member.user_id),
                        project_id: Set(project_id),
                        role_id: Set(member.role_id),
                        created_at: Set(now.into()),
                        updated_at: Set(now.into()),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?;
                }
            }
        }

        txn.commit().await?;
        info!("Added {} member(s) to project #{}", members.len(), project_id);
        Ok(())
    }

    /// Remove memberships, returning how many existed
    pub async fn project_remove_members(
        &self,
        project_id: ProjectId,
        user_ids: &[UserId],
    ) -> Result<u64> {
        let result = entities::ProjectMember::delete_many()
            .filter(project_member::Column::ProjectId.eq(project_id))
            .filter(project_member::Column::UserId.is_in(user_ids.iter().copied()))
            .exec(&self.db)
            .await?;

        info!(
            "Removed {} member(s) from project #{}",
            result.rows_affected, project_id
        );
        Ok(result.rows_affected)
    }

    /// Change the role of an existing member
    pub async fn project_set_role_for_user(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()> {
        if entities::Role::find_by_id(role_id).one(&self.db).await?.is_none() {
            return Err(KeystoneError::not_found(format!("role #{}", role_id)));
        }

        let model = entities::ProjectMember::find()
            .filter(project_member::Column::UserId.eq(user_id))
            .filter(project_member::Column::ProjectId.eq(project_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                KeystoneError::not_found(format!(
                    "user #{} is not a member of project #{}",
                    user_id, project_id
                ))
            })?;

        let mut active_model: project_member::ActiveModel = model.into();
        active_model.role_id = Set(role_id);
        active_model.updated_at = Set(chrono::Utc::now().into());
        active_model.update(&self.db).await?;

        debug!(
            "User #{} now holds role #{} on project #{}",
            user_id, role_id, project_id
        );
        Ok(())
    }
}
