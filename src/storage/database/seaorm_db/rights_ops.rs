use crate::core::models::{
    EnvironmentType, EnvironmentTypeId, RoleId, RoleLookup, RolesEnvironmentType,
};
use crate::utils::error::{KeystoneError, Result};
use sea_orm::*;
use tracing::{debug, info};

use super::super::entities::{self, environment_type, roles_environment_type};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Rights matrix cell for the pair, if configured
    pub async fn find_roles_environment_type(
        &self,
        role_id: RoleId,
        environment_type_id: EnvironmentTypeId,
    ) -> Result<Option<RolesEnvironmentType>> {
        debug!(
            "Finding rights of role #{} on environment type #{}",
            role_id, environment_type_id
        );

        let model = self.find_rights_model(role_id, environment_type_id).await?;
        Ok(model.map(|m| m.to_domain_rights()))
    }

    /// Every configured matrix row, ordered by role then environment type
    pub async fn list_rights(&self) -> Result<Vec<RolesEnvironmentType>> {
        let models = entities::RolesEnvironmentType::find()
            .order_by_asc(roles_environment_type::Column::RoleId)
            .order_by_asc(roles_environment_type::Column::EnvironmentTypeId)
            .all(&self.db)
            .await?;

        Ok(models.iter().map(|m| m.to_domain_rights()).collect())
    }

    /// Insert the matrix row for the pair or overwrite its booleans
    pub async fn upsert_roles_environment_type(
        &self,
        row: &RolesEnvironmentType,
    ) -> Result<RolesEnvironmentType> {
        if self.find_role(&RoleLookup::Id(row.role_id)).await?.is_none() {
            return Err(KeystoneError::not_found(format!("role #{}", row.role_id)));
        }

        let environment_type = entities::EnvironmentType::find_by_id(row.environment_type_id)
            .one(&self.db)
            .await?;
        if environment_type.is_none() {
            return Err(KeystoneError::not_found(format!(
                "environment type #{}",
                row.environment_type_id
            )));
        }

        let existing = self
            .find_rights_model(row.role_id, row.environment_type_id)
            .await?;

        let model = match existing {
            Some(model) => {
                let mut active_model: roles_environment_type::ActiveModel = model.into();
                active_model.read = Set(row.read);
                active_model.write = Set(row.write);
                active_model.invite = Set(row.invite);
                active_model.update(&self.db).await?
            }
            None => {
                roles_environment_type::ActiveModel {
                    role_id: Set(row.role_id),
                    environment_type_id: Set(row.environment_type_id),
                    read: Set(row.read),
                    write: Set(row.write),
                    invite: Set(row.invite),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?
            }
        };

        self.rights_epoch.bump();
        debug!(
            "Rights of role #{} on environment type #{}: read={} write={} invite={}",
            model.role_id, model.environment_type_id, model.read, model.write, model.invite
        );
        Ok(model.to_domain_rights())
    }

    /// Find an environment type by name
    pub async fn find_environment_type(&self, name: &str) -> Result<Option<EnvironmentType>> {
        let model = entities::EnvironmentType::find()
            .filter(environment_type::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(model.map(|m| m.to_domain_environment_type()))
    }

    /// All environment types ordered by ID
    pub async fn list_environment_types(&self) -> Result<Vec<EnvironmentType>> {
        let models = entities::EnvironmentType::find()
            .order_by_asc(environment_type::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.iter().map(|m| m.to_domain_environment_type()).collect())
    }

    /// Return the environment type called `name`, creating it when missing
    pub async fn get_or_create_environment_type(
        &self,
        name: &str,
    ) -> Result<(EnvironmentType, bool)> {
        if let Some(existing) = self.find_environment_type(name).await? {
            return Ok((existing, false));
        }

        if name.trim().is_empty() {
            return Err(KeystoneError::validation(
                "Environment type name cannot be empty",
            ));
        }

        let model = environment_type::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        self.rights_epoch.bump();
        info!("Created environment type {} (#{})", model.name, model.id);

        Ok((model.to_domain_environment_type(), true))
    }

    async fn find_rights_model(
        &self,
        role_id: RoleId,
        environment_type_id: EnvironmentTypeId,
    ) -> Result<Option<roles_environment_type::Model>> {
        let model = entities::RolesEnvironmentType::find()
            .filter(roles_environment_type::Column::RoleId.eq(role_id))
            .filter(roles_environment_type::Column::EnvironmentTypeId.eq(environment_type_id))
            .one(&self.db)
            .await?;

        Ok(model)
    }
}
