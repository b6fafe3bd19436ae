//! Membership service tests

#[cfg(test)]
mod tests {
    use crate::common::Team;
    use crate::{assert_err, assert_ok};
    use keystone_rights::rights::AssignmentPolicy;
    use keystone_rights::rights::defaults::{ADMIN, DEVELOPER, DEVOPS, LEAD_DEV};
    use keystone_rights::{KeystoneError, MemberRole, MembershipService, RightsRepository};
    use std::sync::Arc;

    fn service(team: &Team) -> MembershipService {
        service_with_policy(team, AssignmentPolicy::default())
    }

    fn service_with_policy(team: &Team, policy: AssignmentPolicy) -> MembershipService {
        let rights: Arc<dyn RightsRepository> = team.db.db_arc();
        MembershipService::new(team.db.db_arc(), rights, policy)
    }

    async fn role_of(team: &Team, user_id: i32) -> Option<String> {
        assert_ok!(
            team.database()
                .find_project_member(user_id, team.project.id)
                .await
        )
        .map(|member| member.role.name)
    }

    #[tokio::test]
    async fn test_add_member() {
        let team = Team::new().await;
        let developer = team.role(DEVELOPER).await;

        assert_ok!(
            service(&team)
                .add_members(
                    &team.lead,
                    &team.project,
                    &[MemberRole::new(team.outsider.id, developer.id)]
                )
                .await
        );
        assert_eq!(role_of(&team, team.outsider.id).await.as_deref(), Some(DEVELOPER));
    }

    #[tokio::test]
    async fn test_add_members_refused_as_a_batch() {
        let team = Team::new().await;
        let developer = team.role(DEVELOPER).await;
        let admin = team.role(ADMIN).await;

        let err = assert_err!(
            service(&team)
                .add_members(
                    &team.lead,
                    &team.project,
                    &[
                        MemberRole::new(team.outsider.id, developer.id),
                        MemberRole::new(team.developer.id, admin.id),
                    ]
                )
                .await
        );
        assert!(err.is_forbidden());

        assert_eq!(role_of(&team, team.outsider.id).await, None);
        assert_eq!(role_of(&team, team.developer.id).await.as_deref(), Some(DEVELOPER));
    }

    #[tokio::test]
    async fn test_add_members_cannot_demote_a_superior() {
        let team = Team::new().await;
        let developer = team.role(DEVELOPER).await;

        let err = assert_err!(
            service(&team)
                .add_members(
                    &team.lead,
                    &team.project,
                    &[MemberRole::new(team.admin.id, developer.id)]
                )
                .await
        );
        assert!(err.is_forbidden());
        assert_eq!(role_of(&team, team.admin.id).await.as_deref(), Some(ADMIN));

        // A member below the acting role can be re-added with a new role
        let lead = team.role(LEAD_DEV).await;
        assert_ok!(
            service(&team)
                .add_members(
                    &team.lead,
                    &team.project,
                    &[MemberRole::new(team.developer.id, lead.id)]
                )
                .await
        );
        assert_eq!(role_of(&team, team.developer.id).await.as_deref(), Some(LEAD_DEV));
    }

    #[tokio::test]
    async fn test_non_member_cannot_add() {
        let team = Team::new().await;
        let developer = team.role(DEVELOPER).await;

        let err = assert_err!(
            service(&team)
                .add_members(
                    &team.outsider,
                    &team.project,
                    &[MemberRole::new(team.outsider.id, developer.id)]
                )
                .await
        );
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_remove_members() {
        let team = Team::new().await;
        let service = service(&team);

        let removed = assert_ok!(
            service
                .remove_members(&team.lead, &team.project, &[team.developer.id])
                .await
        );
        assert_eq!(removed, 1);
        assert_eq!(role_of(&team, team.developer.id).await, None);

        let err = assert_err!(
            service
                .remove_members(&team.lead, &team.project, &[team.devops.id])
                .await
        );
        assert!(err.is_forbidden());
        assert_eq!(role_of(&team, team.devops.id).await.as_deref(), Some(DEVOPS));
    }

    #[tokio::test]
    async fn test_owner_cannot_be_removed() {
        let team = Team::new().await;

        let err = assert_err!(
            service(&team)
                .remove_members(&team.admin, &team.project, &[team.owner.id])
                .await
        );
        assert!(err.is_forbidden());
        assert_eq!(role_of(&team, team.owner.id).await.as_deref(), Some(ADMIN));
    }

    #[tokio::test]
    async fn test_set_member_role() {
        let team = Team::new().await;

        let role = assert_ok!(
            service(&team)
                .set_member_role(&team.devops, &team.developer, LEAD_DEV, &team.project)
                .await
        );
        assert_eq!(role.name, LEAD_DEV);
        assert_eq!(role_of(&team, team.developer.id).await.as_deref(), Some(LEAD_DEV));
    }

    #[tokio::test]
    async fn test_set_member_role_forbidden_leaves_role() {
        let team = Team::new().await;

        let err = assert_err!(
            service(&team)
                .set_member_role(&team.lead, &team.developer, DEVOPS, &team.project)
                .await
        );
        assert!(matches!(err, KeystoneError::Forbidden(_)));
        assert_eq!(role_of(&team, team.developer.id).await.as_deref(), Some(DEVELOPER));
    }

    #[tokio::test]
    async fn test_set_member_role_unknown_role() {
        let team = Team::new().await;

        let err = assert_err!(
            service(&team)
                .set_member_role(&team.admin, &team.developer, "superuser", &team.project)
                .await
        );
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_same_role_policy() {
        let team = Team::new().await;
        let strict = service_with_policy(
            &team,
            AssignmentPolicy {
                allow_same_role: false,
            },
        );

        // Another admin holds the acting role, so a strict policy refuses
        let err = assert_err!(
            strict
                .set_member_role(&team.owner, &team.admin, DEVELOPER, &team.project)
                .await
        );
        assert!(err.is_forbidden());

        assert_ok!(
            service(&team)
                .set_member_role(&team.owner, &team.admin, DEVELOPER, &team.project)
                .await
        );
        assert_eq!(role_of(&team, team.admin.id).await.as_deref(), Some(DEVELOPER));
    }

    #[tokio::test]
    async fn test_assignable_roles() {
        let team = Team::new().await;

        let roles = assert_ok!(service(&team).assignable_roles(&team.lead, &team.project).await);
        let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec![LEAD_DEV, DEVELOPER]);
    }
}
