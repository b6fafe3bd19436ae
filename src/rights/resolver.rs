//! Environment rights resolution
//!
//! Environment rights come only from the matrix row of the member's own
//! role. They are not inherited through the role hierarchy.

use super::repository::RightsRepository;
use crate::core::models::{Environment, Project, User, UserRight};
use crate::utils::error::Result;
use tracing::debug;

/// Whether `user` holds `right` on `environment` of `project`
///
/// * `Err(NotFound)` when the user is not a member of the project,
/// * `Ok(false)` when no matrix row exists for the member's role,
/// * otherwise the matrix value.
pub async fn can_user_has_right<R: RightsRepository + ?Sized>(
    repo: &R,
    user: &User,
    project: &Project,
    environment: &Environment,
    right: UserRight,
) -> Result<bool> {
    let member = repo.get_project_member(user.id, project.id).await?;

    let row = repo
        .get_roles_environment_type(member.role_id, environment.environment_type_id)
        .await?;

    let Some(row) = row else {
        debug!(
            "No rights configured for {} on environment type #{}",
            member.role, environment.environment_type_id
        );
        return Ok(false);
    };

    let allowed = row.allows(right);
    debug!(
        "User #{} ({}) {} {} on environment '{}'",
        user.id,
        member.role.name,
        if allowed { "may" } else { "may not" },
        right,
        environment.name
    );

    Ok(allowed)
}

/// String-keyed variant; an unknown right name is an error, never a denial
pub async fn can_user_has_right_on_environment<R: RightsRepository + ?Sized>(
    repo: &R,
    user: &User,
    project: &Project,
    environment: &Environment,
    right: &str,
) -> Result<bool> {
    let right: UserRight = right.parse()?;
    can_user_has_right(repo, user, project, environment, right).await
}

pub async fn can_user_read_environment<R: RightsRepository + ?Sized>(
    repo: &R,
    user: &User,
    project: &Project,
    environment: &Environment,
) -> Result<bool> {
    can_user_has_right(repo, user, project, environment, UserRight::Read).await
}

pub async fn can_user_write_on_environment<R: RightsRepository + ?Sized>(
    repo: &R,
    user: &User,
    project: &Project,
    environment: &Environment,
) -> Result<bool> {
    can_user_has_right(repo, user, project, environment, UserRight::Write).await
}

pub async fn can_user_invite_on_environment<R: RightsRepository + ?Sized>(
    repo: &R,
    user: &User,
    project: &Project,
    environment: &Environment,
) -> Result<bool> {
    can_user_has_right(repo, user, project, environment, UserRight::Invite).await
}
