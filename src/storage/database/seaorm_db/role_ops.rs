use crate::core::models::{Role, RoleLookup};
use crate::rights::RoleGraph;
use crate::utils::error::{KeystoneError, Result};
use sea_orm::*;
use tracing::{debug, info};

use super::super::entities::{self, role};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Find a role by ID or name
    pub async fn find_role(&self, lookup: &RoleLookup) -> Result<Option<Role>> {
        debug!("Finding {}", lookup);

        let query = match lookup {
            RoleLookup::Id(id) => entities::Role::find_by_id(*id),
            RoleLookup::Name(name) => entities::Role::find().filter(role::Column::Name.eq(name)),
        };

        let model = query.one(&self.db).await?;
        Ok(model.map(|m| m.to_domain_role()))
    }

    /// All roles ordered by ID
    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        let models = entities::Role::find()
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.iter().map(|m| m.to_domain_role()).collect())
    }

    /// Load the whole hierarchy
    pub async fn role_graph(&self) -> Result<RoleGraph> {
        Ok(RoleGraph::from_roles(self.list_roles().await?))
    }

    /// Insert a role. The ID of `role` is ignored, the stored role is returned.
    ///
    /// The parent must already exist. A new role has no children, so it
    /// cannot close a cycle.
    pub async fn create_role(&self, role: &Role) -> Result<Role> {
        if role.name.trim().is_empty() {
            return Err(KeystoneError::validation("Role name cannot be empty"));
        }

        if self.find_role(&RoleLookup::name(&role.name)).await?.is_some() {
            return Err(KeystoneError::conflict(format!(
                "Role '{}' already exists",
                role.name
            )));
        }

        if let Some(parent_id) = role.parent_id {
            if self.find_role(&RoleLookup::Id(parent_id)).await?.is_none() {
                return Err(KeystoneError::not_found(format!(
                    "Parent role #{} of '{}'",
                    parent_id, role.name
                )));
            }
        }

        let now = chrono::Utc::now();
        let active_model = role::ActiveModel {
            name: Set(role.name.clone()),
            description: Set(role.description.clone()),
            parent_id: Set(role.parent_id),
            can_add_member: Set(role.can_add_member),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        self.rights_epoch.bump();
        info!("Created role {} (#{})", model.name, model.id);

        Ok(model.to_domain_role())
    }

    /// Return the role named like `role`, creating it when missing
    ///
    /// The flag tells whether the role was created.
    pub async fn get_or_create_role(&self, role: &Role) -> Result<(Role, bool)> {
        match self.find_role(&RoleLookup::name(&role.name)).await? {
            Some(existing) => Ok((existing, false)),
            None => Ok((self.create_role(role).await?, true)),
        }
    }
}
