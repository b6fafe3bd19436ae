//! Rights resolution and member guard against a seeded database

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::Team;
    use keystone_rights::StorageLayer;
    use keystone_rights::config::{DatabaseConfig, KeystoneConfig, RightsCacheConfig};
    use keystone_rights::rights::defaults::{ADMIN, DEV, DEVELOPER, DEVOPS, LEAD_DEV, PROD, STAGING};
    use keystone_rights::rights::{self, AssignmentPolicy, CachedRightsRepository, MemberGuard};
    use keystone_rights::{
        KeystoneError, MemberRole, RightsRepository, Role, RoleLookup, RolesEnvironmentType, User,
        UserRight,
    };

    async fn has_right(team: &Team, user: &User, environment: &str, right: UserRight) -> bool {
        let environment = team.environment(environment).await;
        assert_ok!(
            rights::can_user_has_right(team.database(), user, &team.project, &environment, right)
                .await
        )
    }

    #[tokio::test]
    async fn test_developer_rights() {
        let team = Team::new().await;
        let developer = team.developer.clone();

        assert!(has_right(&team, &developer, DEV, UserRight::Read).await);
        assert!(has_right(&team, &developer, DEV, UserRight::Write).await);
        assert!(!has_right(&team, &developer, DEV, UserRight::Invite).await);

        for environment in [STAGING, PROD] {
            for right in UserRight::ALL {
                assert!(!has_right(&team, &developer, environment, right).await);
            }
        }
    }

    #[tokio::test]
    async fn test_lead_dev_rights() {
        let team = Team::new().await;
        let lead = team.lead.clone();

        for right in UserRight::ALL {
            assert!(has_right(&team, &lead, DEV, right).await);
            assert!(!has_right(&team, &lead, PROD, right).await);
        }
    }

    #[tokio::test]
    async fn test_devops_and_admin_rights() {
        let team = Team::new().await;

        for user in [team.devops.clone(), team.admin.clone(), team.owner.clone()] {
            for environment in [DEV, STAGING, PROD] {
                for right in UserRight::ALL {
                    assert!(has_right(&team, &user, environment, right).await);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_named_helpers() {
        let team = Team::new().await;
        let prod = team.environment(PROD).await;
        let database = team.database();

        assert!(assert_ok!(
            rights::can_user_read_environment(database, &team.devops, &team.project, &prod).await
        ));
        assert!(assert_ok!(
            rights::can_user_write_on_environment(database, &team.devops, &team.project, &prod)
                .await
        ));
        assert!(!assert_ok!(
            rights::can_user_invite_on_environment(
                database,
                &team.developer,
                &team.project,
                &prod
            )
            .await
        ));
    }

    #[tokio::test]
    async fn test_non_member_is_an_error() {
        let team = Team::new().await;
        let dev = team.environment(DEV).await;

        let err = rights::can_user_read_environment(team.database(), &team.outsider, &team.project, &dev)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unknown_right_name() {
        let team = Team::new().await;
        let dev = team.environment(DEV).await;

        let allowed = assert_ok!(
            rights::can_user_has_right_on_environment(
                team.database(),
                &team.developer,
                &team.project,
                &dev,
                "write"
            )
            .await
        );
        assert!(allowed);

        // Rejected before membership is looked at
        let err = rights::can_user_has_right_on_environment(
            team.database(),
            &team.outsider,
            &team.project,
            &dev,
            "delete",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, KeystoneError::UnknownRight(_)));
    }

    #[tokio::test]
    async fn test_role_without_matrix_row() {
        let team = Team::new().await;
        let database = team.database();
        let developer_role = team.role(DEVELOPER).await;

        let intern = assert_ok!(
            database
                .create_role(&Role::new(0, "intern").with_parent(developer_role.id))
                .await
        );
        assert_ok!(
            database
                .project_set_role_for_user(team.project.id, team.other_developer.id, intern.id)
                .await
        );

        for right in UserRight::ALL {
            assert!(!has_right(&team, &team.other_developer, DEV, right).await);
        }
    }

    #[tokio::test]
    async fn test_custom_row_resolves_per_right() {
        let team = Team::new().await;
        let database = team.database();
        let developer_role = team.role(DEVELOPER).await;
        let prod = team.environment(PROD).await;

        assert_ok!(
            database
                .upsert_roles_environment_type(&RolesEnvironmentType::new(
                    developer_role.id,
                    prod.environment_type_id,
                    true,
                    false,
                    true
                ))
                .await
        );

        let read = assert_ok!(
            rights::can_user_read_environment(database, &team.developer, &team.project, &prod)
                .await
        );
        let write = assert_ok!(
            rights::can_user_write_on_environment(database, &team.developer, &team.project, &prod)
                .await
        );
        let invite = assert_ok!(
            rights::can_user_invite_on_environment(
                database,
                &team.developer,
                &team.project,
                &prod
            )
            .await
        );
        assert_eq!((read, write, invite), (true, false, true));
    }

    #[tokio::test]
    async fn test_rights_are_not_inherited() {
        let team = Team::new().await;
        let database = team.database();
        let lead_role = team.role(LEAD_DEV).await;
        let staging = assert_ok!(database.find_environment_type(STAGING).await).unwrap();

        // A developer right on staging does not flow up to lead-dev
        let developer_role = team.role(DEVELOPER).await;
        assert_ok!(
            database
                .upsert_roles_environment_type(&RolesEnvironmentType::new(
                    developer_role.id,
                    staging.id,
                    true,
                    false,
                    false
                ))
                .await
        );

        assert!(has_right(&team, &team.developer, STAGING, UserRight::Read).await);
        assert!(!has_right(&team, &team.lead, STAGING, UserRight::Read).await);
        let row = assert_ok!(
            database
                .find_roles_environment_type(lead_role.id, staging.id)
                .await
        );
        assert!(!row.unwrap().read);
    }

    #[tokio::test]
    async fn test_role_dominance() {
        let team = Team::new().await;
        let database = team.database();
        let admin = team.role(ADMIN).await;
        let devops = team.role(DEVOPS).await;
        let lead = team.role(LEAD_DEV).await;
        let developer = team.role(DEVELOPER).await;

        for target in [&devops, &lead, &developer] {
            assert!(assert_ok!(rights::can_role_add_role(database, &admin, target).await));
        }
        assert!(!assert_ok!(rights::can_role_add_role(database, &devops, &admin).await));
        assert!(!assert_ok!(rights::can_role_add_role(database, &lead, &devops).await));
        assert!(assert_ok!(rights::can_role_add_role(database, &lead, &developer).await));
        assert!(!assert_ok!(rights::can_role_add_role(database, &developer, &developer).await));

        // Same role depends on the policy
        assert!(assert_ok!(rights::can_role_add_role(database, &lead, &lead).await));
        let strict = MemberGuard::new(database).with_policy(AssignmentPolicy {
            allow_same_role: false,
        });
        assert!(!assert_ok!(strict.can_role_add_role(&lead, &lead).await));
    }

    #[tokio::test]
    async fn test_set_member_role() {
        let team = Team::new().await;
        let database = team.database();
        let devops = team.role(DEVOPS).await;
        let lead = team.role(LEAD_DEV).await;
        let developer = team.role(DEVELOPER).await;

        // Promote within the acting role's reach
        assert!(assert_ok!(
            rights::can_user_set_member_role(
                database,
                &team.lead,
                &team.developer,
                &lead,
                &team.project
            )
            .await
        ));
        // Not above the acting role
        assert!(!assert_ok!(
            rights::can_user_set_member_role(
                database,
                &team.lead,
                &team.developer,
                &devops,
                &team.project
            )
            .await
        ));
        // Not on someone above
        assert!(!assert_ok!(
            rights::can_user_set_member_role(
                database,
                &team.lead,
                &team.devops,
                &developer,
                &team.project
            )
            .await
        ));
        // Developers manage nobody
        assert!(!assert_ok!(
            rights::can_user_set_member_role(
                database,
                &team.developer,
                &team.other_developer,
                &developer,
                &team.project
            )
            .await
        ));
    }

    #[tokio::test]
    async fn test_owner_role_is_fixed() {
        let team = Team::new().await;
        let database = team.database();
        let developer = team.role(DEVELOPER).await;

        assert!(!assert_ok!(
            rights::can_user_set_member_role(
                database,
                &team.admin,
                &team.owner,
                &developer,
                &team.project
            )
            .await
        ));

        let guard = MemberGuard::new(database);
        assert!(!assert_ok!(
            guard
                .can_user_remove_members(&team.admin, &team.project, &[team.owner.id])
                .await
        ));
        assert!(!assert_ok!(
            guard
                .can_user_add_members(
                    &team.admin,
                    &team.project,
                    &[MemberRole::new(team.owner.id, developer.id)]
                )
                .await
        ));
    }

    #[tokio::test]
    async fn test_assignable_roles() {
        let team = Team::new().await;
        let guard = MemberGuard::new(team.database());

        let names = |roles: Vec<Role>| roles.into_iter().map(|r| r.name).collect::<Vec<_>>();

        let roles = assert_ok!(guard.roles_member_can_assign(&team.devops, &team.project).await);
        assert_eq!(names(roles), vec![DEVOPS, LEAD_DEV, DEVELOPER]);

        let roles = assert_ok!(guard.roles_member_can_assign(&team.developer, &team.project).await);
        assert!(roles.is_empty());
    }

    #[tokio::test]
    async fn test_cached_repository_sees_writes_through_it() {
        let team = Team::new().await;
        let cache = CachedRightsRepository::new(team.db.db_arc(), &RightsCacheConfig::default());
        let developer = team.role(DEVELOPER).await;

        assert!(assert_ok!(cache.get_children_roles(&developer).await).is_empty());

        let intern = assert_ok!(
            cache
                .create_role(&Role::new(0, "intern").with_parent(developer.id))
                .await
        );
        let children = assert_ok!(cache.get_children_roles(&developer).await);
        assert_eq!(children, vec![intern.clone()]);
        assert_eq!(assert_ok!(cache.get_roles().await).len(), 5);

        let dev = team.environment(DEV).await;
        assert_eq!(
            assert_ok!(
                cache
                    .get_roles_environment_type(intern.id, dev.environment_type_id)
                    .await
            ),
            None
        );

        let row = RolesEnvironmentType::new(intern.id, dev.environment_type_id, true, false, false);
        assert_ok!(cache.upsert_roles_environment_type(&row).await);
        assert_eq!(
            assert_ok!(
                cache
                    .get_roles_environment_type(intern.id, dev.environment_type_id)
                    .await
            ),
            Some(row)
        );
    }

    #[tokio::test]
    async fn test_cached_repository_resolves_rights() {
        let team = Team::new().await;
        let cache = CachedRightsRepository::new(team.db.db_arc(), &RightsCacheConfig::default());
        let dev = team.environment(DEV).await;

        for _ in 0..2 {
            assert!(assert_ok!(
                rights::can_user_write_on_environment(&cache, &team.developer, &team.project, &dev)
                    .await
            ));
        }

        // Memberships are read through, so removal shows immediately
        assert_ok!(
            team.database()
                .project_remove_members(team.project.id, &[team.developer.id])
                .await
        );
        let err = rights::can_user_write_on_environment(&cache, &team.developer, &team.project, &dev)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    async fn cached_storage() -> StorageLayer {
        let mut config = KeystoneConfig::default();
        config.storage.database = DatabaseConfig::in_memory();
        config.rights.seed_defaults = true;
        config.rights.cache.enabled = true;
        assert_ok!(StorageLayer::new(&config).await)
    }

    #[tokio::test]
    async fn test_storage_cache_sees_database_writes() {
        let storage = cached_storage().await;
        let database = storage.database.as_ref();
        let developer = assert_ok!(database.require_role(DEVELOPER).await);
        let prod = assert_ok!(database.find_environment_type(PROD).await).unwrap();

        let before = assert_ok!(
            storage
                .rights
                .get_roles_environment_type(developer.id, prod.id)
                .await
        )
        .unwrap();
        assert!(!before.read);

        assert_ok!(
            database
                .upsert_roles_environment_type(&RolesEnvironmentType::new(
                    developer.id,
                    prod.id,
                    true,
                    false,
                    false
                ))
                .await
        );

        let after = assert_ok!(
            storage
                .rights
                .get_roles_environment_type(developer.id, prod.id)
                .await
        )
        .unwrap();
        assert!(after.read);
    }

    #[tokio::test]
    async fn test_storage_cache_sees_new_roles() {
        let storage = cached_storage().await;
        let database = storage.database.as_ref();
        let developer = assert_ok!(storage.rights.get_role(RoleLookup::name(DEVELOPER)).await);

        assert!(assert_ok!(storage.rights.get_children_roles(&developer).await).is_empty());
        assert_eq!(assert_ok!(storage.rights.get_roles().await).len(), 4);

        let intern = assert_ok!(
            database
                .create_role(&Role::new(0, "intern").with_parent(developer.id))
                .await
        );

        let children = assert_ok!(storage.rights.get_children_roles(&developer).await);
        assert_eq!(children, vec![intern.clone()]);
        assert_eq!(
            assert_ok!(storage.rights.get_role(RoleLookup::name("intern")).await),
            intern
        );
    }
}
