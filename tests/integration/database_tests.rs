//! Database integration tests
//!
//! Tests database operations using real in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::common::{Team, TestDatabase};
    use crate::{assert_err, assert_ok};
    use keystone_rights::config::{DatabaseConfig, KeystoneConfig};
    use keystone_rights::rights::defaults::{ADMIN, DEVELOPER, LEAD_DEV};
    use keystone_rights::storage::StorageLayer;
    use keystone_rights::storage::database::Database;
    use keystone_rights::{KeystoneError, MemberRole, Role, RolesEnvironmentType};

    /// Test basic database connection and health check
    #[tokio::test]
    async fn test_database_health_check() {
        let db = assert_ok!(Database::new(&DatabaseConfig::in_memory()).await);

        let health = db.health_check().await;
        assert!(health.is_ok(), "Health check failed: {:?}", health.err());
    }

    /// Migrations can run again on an up to date schema
    #[tokio::test]
    async fn test_database_migration_is_repeatable() {
        let db = TestDatabase::new().await;
        let result = db.db().migrate().await;
        assert!(result.is_ok(), "Migration failed: {:?}", result.err());
    }

    #[tokio::test]
    async fn test_create_role_requires_existing_parent() {
        let db = TestDatabase::new().await;

        let orphan = Role::new(0, "orphan").with_parent(42);
        let err = assert_err!(db.db().create_role(&orphan).await);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_role_rejects_duplicates() {
        let db = TestDatabase::seeded().await;

        let err = assert_err!(db.db().create_role(&Role::new(0, ADMIN)).await);
        assert!(matches!(err, KeystoneError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_role_below_existing() {
        let db = TestDatabase::seeded().await;
        let database = db.db();
        let lead = assert_ok!(database.require_role(LEAD_DEV).await);

        let intern = Role::new(0, "intern")
            .with_parent(lead.id)
            .with_description("Reads dev");
        let created = assert_ok!(database.create_role(&intern).await);
        assert_eq!(created.parent_id, Some(lead.id));
        assert!(!created.can_add_member);

        let graph = assert_ok!(database.role_graph().await);
        assert!(graph.is_above(&lead, &created));
        assert!(graph.validate().is_ok());

        let (again, was_created) = assert_ok!(database.get_or_create_role(&intern).await);
        assert!(!was_created);
        assert_eq!(again.id, created.id);
    }

    #[tokio::test]
    async fn test_upsert_rights_overwrites() {
        let db = TestDatabase::seeded().await;
        let database = db.db();
        let developer = assert_ok!(database.require_role(DEVELOPER).await);
        let prod = assert_ok!(database.find_environment_type("prod").await).unwrap();

        let before = assert_ok!(
            database
                .find_roles_environment_type(developer.id, prod.id)
                .await
        );
        assert!(!before.unwrap().read);

        let row = RolesEnvironmentType::new(developer.id, prod.id, true, false, true);
        assert_ok!(database.upsert_roles_environment_type(&row).await);

        let after = assert_ok!(
            database
                .find_roles_environment_type(developer.id, prod.id)
                .await
        );
        assert_eq!(after, Some(row));
        assert_eq!(assert_ok!(database.list_rights().await).len(), 12);
    }

    #[tokio::test]
    async fn test_upsert_rights_unknown_environment_type() {
        let db = TestDatabase::seeded().await;
        let admin = assert_ok!(db.db().require_role(ADMIN).await);

        let row = RolesEnvironmentType::denied(admin.id, 99);
        let err = assert_err!(db.db().upsert_roles_environment_type(&row).await);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_project_creates_environments() {
        let team = Team::new().await;
        let environments = assert_ok!(team.database().list_environments(team.project.id).await);

        let names: Vec<&str> = environments.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["dev", "staging", "prod"]);
        assert!(environments.iter().all(|e| e.project_id == team.project.id));

        let found = assert_ok!(team.database().find_project_by_uuid(&team.project.uuid).await);
        assert_eq!(found, Some(team.project.clone()));
    }

    #[tokio::test]
    async fn test_create_project_needs_environment_types() {
        let db = TestDatabase::new().await;
        let err = assert_err!(db.db().create_project("empty", None).await);
        assert!(matches!(err, KeystoneError::Validation(_)));
    }

    #[tokio::test]
    async fn test_set_new_version_id() {
        let team = Team::new().await;
        let dev = team.environment("dev").await;

        let version = assert_ok!(team.database().set_new_version_id(dev.id).await);
        assert_ne!(version, dev.version_id);

        let reloaded = assert_ok!(team.database().get_environment(dev.id).await);
        assert_eq!(reloaded.version_id, version);

        let err = assert_err!(team.database().set_new_version_id(9999).await);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_project_owner() {
        let team = Team::new().await;
        let owner = assert_ok!(team.database().get_project_owner_id(team.project.id).await);
        assert_eq!(owner, Some(team.owner.id));

        let orphan = assert_ok!(team.database().create_project("side", None).await);
        let owner = assert_ok!(team.database().get_project_owner_id(orphan.id).await);
        assert_eq!(owner, None);
    }

    #[tokio::test]
    async fn test_add_members_upserts() {
        let team = Team::new().await;
        let database = team.database();
        let lead = team.role(LEAD_DEV).await;

        assert_ok!(
            database
                .project_add_members(
                    team.project.id,
                    &[MemberRole::new(team.developer.id, lead.id)]
                )
                .await
        );

        let member = assert_ok!(
            database
                .find_project_member(team.developer.id, team.project.id)
                .await
        )
        .unwrap();
        assert_eq!(member.role_id, lead.id);
        assert_eq!(member.role.name, LEAD_DEV);

        let members = assert_ok!(database.list_project_members(team.project.id).await);
        assert_eq!(members.len(), 6);
    }

    #[tokio::test]
    async fn test_add_members_is_all_or_nothing() {
        let team = Team::new().await;
        let database = team.database();
        let developer = team.role(DEVELOPER).await;

        let err = assert_err!(
            database
                .project_add_members(
                    team.project.id,
                    &[
                        MemberRole::new(team.outsider.id, developer.id),
                        MemberRole::new(team.outsider.id, 404),
                    ]
                )
                .await
        );
        assert!(err.is_not_found());

        let member = assert_ok!(
            database
                .find_project_member(team.outsider.id, team.project.id)
                .await
        );
        assert!(member.is_none());
    }

    #[tokio::test]
    async fn test_remove_members() {
        let team = Team::new().await;
        let database = team.database();

        let removed = assert_ok!(
            database
                .project_remove_members(
                    team.project.id,
                    &[team.developer.id, team.outsider.id]
                )
                .await
        );
        assert_eq!(removed, 1);

        let member = assert_ok!(
            database
                .find_project_member(team.developer.id, team.project.id)
                .await
        );
        assert!(member.is_none());
    }

    #[tokio::test]
    async fn test_set_role_for_user() {
        let team = Team::new().await;
        let database = team.database();
        let lead = team.role(LEAD_DEV).await;

        assert_ok!(
            database
                .project_set_role_for_user(team.project.id, team.developer.id, lead.id)
                .await
        );
        let member = assert_ok!(
            database
                .find_project_member(team.developer.id, team.project.id)
                .await
        )
        .unwrap();
        assert_eq!(member.role_id, lead.id);

        let err = assert_err!(
            database
                .project_set_role_for_user(team.project.id, team.outsider.id, lead.id)
                .await
        );
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_storage_layer_from_config() {
        let mut config = KeystoneConfig::default();
        config.storage.database = DatabaseConfig::in_memory();
        config.rights.seed_defaults = true;

        let storage = assert_ok!(StorageLayer::new(&config).await);
        assert_ok!(storage.health_check().await);

        let roles = assert_ok!(storage.rights.get_roles().await);
        assert_eq!(roles.len(), 4);
    }
}
