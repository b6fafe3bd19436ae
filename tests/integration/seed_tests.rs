//! Seeding tests

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::TestDatabase;
    use keystone_rights::rights::RightsTable;
    use keystone_rights::rights::defaults::{
        self, ADMIN, DEV, DEVELOPER, DEVOPS, LEAD_DEV, PROD, STAGING,
    };
    use keystone_rights::storage::database::entities::{self, role};
    use keystone_rights::{KeystoneError, Role, RoleLookup, UserRight};
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};

    #[tokio::test]
    async fn test_seed_matches_reference_data() {
        let db = TestDatabase::new().await;
        let report = assert_ok!(db.db().seed_default_rights().await);
        assert_eq!(report.roles_created, 4);
        assert_eq!(report.environment_types_created, 3);
        assert_eq!(report.rights_created, 12);

        // A fresh database hands out the reference IDs
        let roles = assert_ok!(db.db().list_roles().await);
        assert_eq!(roles, defaults::reference_roles());

        let environment_types = assert_ok!(db.db().list_environment_types().await);
        assert_eq!(environment_types, defaults::reference_environment_types());

        let rights = assert_ok!(db.db().list_rights().await);
        let mut expected = defaults::reference_rights();
        expected.sort_by_key(|row| (row.role_id, row.environment_type_id));
        assert_eq!(rights, expected);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = TestDatabase::seeded().await;

        let report = assert_ok!(db.db().seed_default_rights().await);
        assert!(report.is_empty());

        let stats = assert_ok!(db.db().stats().await);
        assert_eq!(stats.roles, 4);
        assert_eq!(stats.rights_rows, 12);
    }

    #[tokio::test]
    async fn test_seed_rolls_back_on_invalid_hierarchy() {
        let db = TestDatabase::new().await;
        let database = db.db();

        // admin -> loop -> admin
        let looped = assert_ok!(database.create_role(&Role::new(0, "loop")).await);
        let admin = assert_ok!(
            database
                .create_role(&Role::new(0, ADMIN).with_parent(looped.id))
                .await
        );
        let model = assert_ok!(
            entities::Role::find_by_id(looped.id)
                .one(database.connection())
                .await
        )
        .unwrap();
        let mut active_model: role::ActiveModel = model.into();
        active_model.parent_id = Set(Some(admin.id));
        assert_ok!(active_model.update(database.connection()).await);

        let err = database.seed_default_rights().await.unwrap_err();
        assert!(matches!(err, KeystoneError::Validation(_)));

        let stats = assert_ok!(database.stats().await);
        assert_eq!(stats.roles, 2);
        assert_eq!(stats.environment_types, 0);
        assert_eq!(stats.rights_rows, 0);
    }

    #[tokio::test]
    async fn test_seed_keeps_edited_rights() {
        let db = TestDatabase::seeded().await;
        let database = db.db();
        let developer = assert_ok!(database.require_role(DEVELOPER).await);
        let staging = assert_ok!(database.find_environment_type(STAGING).await).unwrap();

        let mut row = assert_ok!(
            database
                .find_roles_environment_type(developer.id, staging.id)
                .await
        )
        .unwrap();
        row.read = true;
        assert_ok!(database.upsert_roles_environment_type(&row).await);

        assert_ok!(database.seed_default_rights().await);

        let table = RightsTable::from_rows(assert_ok!(database.list_rights().await));
        assert!(table.allows(developer.id, staging.id, UserRight::Read));
    }

    #[tokio::test]
    async fn test_seeded_hierarchy() {
        let db = TestDatabase::seeded().await;
        let graph = assert_ok!(db.db().role_graph().await);
        assert!(graph.validate().is_ok());

        let admin = graph.find_by_name(ADMIN).cloned().unwrap();
        let names: Vec<String> = graph
            .children_of(&admin)
            .into_iter()
            .map(|role| role.name)
            .collect();
        assert_eq!(names, vec![DEVOPS, LEAD_DEV, DEVELOPER]);

        let developer = assert_ok!(db.db().find_role(&RoleLookup::name(DEVELOPER)).await).unwrap();
        assert!(!developer.can_add_member);
    }

    #[tokio::test]
    async fn test_seeded_matrix() {
        let db = TestDatabase::seeded().await;
        let database = db.db();
        let table = RightsTable::from_rows(assert_ok!(database.list_rights().await));

        let role = |name: &str| defaults::reference_roles().into_iter().find(|r| r.name == name).unwrap().id;
        let env = |name: &str| {
            defaults::reference_environment_types()
                .into_iter()
                .find(|t| t.name == name)
                .unwrap()
                .id
        };

        for environment_type in [DEV, STAGING, PROD] {
            for right in UserRight::ALL {
                assert!(table.allows(role(ADMIN), env(environment_type), right));
                assert!(table.allows(role(DEVOPS), env(environment_type), right));
            }
        }
        assert!(table.allows(role(LEAD_DEV), env(DEV), UserRight::Invite));
        assert!(!table.allows(role(LEAD_DEV), env(PROD), UserRight::Read));
        assert!(table.allows(role(DEVELOPER), env(DEV), UserRight::Write));
        assert!(!table.allows(role(DEVELOPER), env(DEV), UserRight::Invite));
        assert!(!table.allows(role(DEVELOPER), env(STAGING), UserRight::Read));
    }
}
