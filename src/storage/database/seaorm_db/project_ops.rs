use crate::core::models::{
    Environment, EnvironmentId, Organization, OrganizationId, Project, ProjectId, User, UserId,
};
use crate::utils::error::{KeystoneError, Result};
use sea_orm::*;
use tracing::{debug, info};

use super::super::entities::{self, environment, organization, project, user};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Create a user
    pub async fn create_user(&self, user_id: &str, username: &str, email: &str) -> Result<User> {
        debug!("Creating user: {}", user_id);

        if self.find_user(user_id).await?.is_some() {
            return Err(KeystoneError::conflict(format!(
                "User '{}' already exists",
                user_id
            )));
        }

        let now = chrono::Utc::now();
        let model = user::ActiveModel {
            user_id: Set(user_id.to_string()),
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(model.to_domain_user())
    }

    /// Find user by public handle
    pub async fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        let model = entities::User::find()
            .filter(user::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(model.map(|m| m.to_domain_user()))
    }

    /// Get user by primary key
    pub async fn get_user(&self, id: UserId) -> Result<User> {
        entities::User::find_by_id(id)
            .one(&self.db)
            .await?
            .map(|m| m.to_domain_user())
            .ok_or_else(|| KeystoneError::not_found(format!("user #{}", id)))
    }

    /// Create an organization owned by `owner_id`
    pub async fn create_organization(&self, name: &str, owner_id: UserId) -> Result<Organization> {
        debug!("Creating organization {} owned by user #{}", name, owner_id);

        self.get_user(owner_id).await?;

        let now = chrono::Utc::now();
        let model = organization::ActiveModel {
            name: Set(name.to_string()),
            owner_id: Set(owner_id),
            paid: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(model.to_domain_organization())
    }

    /// Create a project with one environment per environment type
    pub async fn create_project(
        &self,
        name: &str,
        organization_id: Option<OrganizationId>,
    ) -> Result<Project> {
        let environment_types = self.list_environment_types().await?;
        if environment_types.is_empty() {
            return Err(KeystoneError::validation(
                "No environment types configured, seed the database first",
            ));
        }

        let txn = self.db.begin().await?;
        let now = chrono::Utc::now();

        let project = project::ActiveModel {
            uuid: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            organization_id: Set(organization_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for environment_type in &environment_types {
            environment::ActiveModel {
                name: Set(environment_type.name.clone()),
                project_id: Set(project.id),
                environment_type_id: Set(environment_type.id),
                version_id: Set(uuid::Uuid::new_v4().to_string()),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        info!(
            "Created project {} (#{}) with {} environments",
            project.name,
            project.id,
            environment_types.len()
        );

        Ok(project.to_domain_project())
    }

    /// Get project by primary key
    pub async fn get_project(&self, id: ProjectId) -> Result<Project> {
        entities::Project::find_by_id(id)
            .one(&self.db)
            .await?
            .map(|m| m.to_domain_project())
            .ok_or_else(|| KeystoneError::not_found(format!("project #{}", id)))
    }

    /// Find project by its public identifier
    pub async fn find_project_by_uuid(&self, uuid: &str) -> Result<Option<Project>> {
        let model = entities::Project::find()
            .filter(project::Column::Uuid.eq(uuid))
            .one(&self.db)
            .await?;

        Ok(model.map(|m| m.to_domain_project()))
    }

    /// Organization of a project, if it has one
    pub async fn get_projects_organization(
        &self,
        project_id: ProjectId,
    ) -> Result<Option<Organization>> {
        let project = entities::Project::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| KeystoneError::not_found(format!("project #{}", project_id)))?;

        let organization = project
            .find_related(entities::Organization)
            .one(&self.db)
            .await?;

        Ok(organization.map(|m| m.to_domain_organization()))
    }

    /// Owner of the organization owning the project
    pub async fn get_project_owner_id(&self, project_id: ProjectId) -> Result<Option<UserId>> {
        let organization = self.get_projects_organization(project_id).await?;
        Ok(organization.map(|o| o.owner_id))
    }

    /// Environments of a project ordered by environment type
    pub async fn list_environments(&self, project_id: ProjectId) -> Result<Vec<Environment>> {
        let models = entities::Environment::find()
            .filter(environment::Column::ProjectId.eq(project_id))
            .order_by_asc(environment::Column::EnvironmentTypeId)
            .all(&self.db)
            .await?;

        Ok(models.iter().map(|m| m.to_domain_environment()).collect())
    }

    /// Get environment by primary key
    pub async fn get_environment(&self, id: EnvironmentId) -> Result<Environment> {
        entities::Environment::find_by_id(id)
            .one(&self.db)
            .await?
            .map(|m| m.to_domain_environment())
            .ok_or_else(|| KeystoneError::not_found(format!("environment #{}", id)))
    }

    /// Rotate the version of an environment, returning the new one
    pub async fn set_new_version_id(&self, environment_id: EnvironmentId) -> Result<String> {
        let model = entities::Environment::find_by_id(environment_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| KeystoneError::not_found(format!("environment #{}", environment_id)))?;

        let version_id = uuid::Uuid::new_v4().to_string();
        let mut active_model: environment::ActiveModel = model.into();
        active_model.version_id = Set(version_id.clone());
        active_model.updated_at = Set(chrono::Utc::now().into());
        active_model.update(&self.db).await?;

        debug!("Environment #{} is now at version {}", environment_id, version_id);
        Ok(version_id)
    }
}
