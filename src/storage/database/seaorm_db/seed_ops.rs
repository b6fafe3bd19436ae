use crate::core::models::{Role, RoleLookup};
use crate::rights::RoleGraph;
use crate::rights::defaults::{ENVIRONMENT_TYPES, RIGHTS, ROLES};
use crate::utils::error::{KeystoneError, Result};
use sea_orm::*;
use std::collections::HashMap;
use tracing::info;

use super::super::entities::{self, environment_type, role, roles_environment_type};
use super::types::SeaOrmDatabase;

/// What a seeding run created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub roles_created: usize,
    pub environment_types_created: usize,
    pub rights_created: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.roles_created == 0 && self.environment_types_created == 0 && self.rights_created == 0
    }
}

impl SeaOrmDatabase {
    /// Create the reference roles, environment types and rights matrix
    ///
    /// Runs in one transaction. Existing rows are left untouched, so running
    /// it again is a no-op and edited rights survive. Nothing is written if
    /// the resulting hierarchy is invalid.
    pub async fn seed_default_rights(&self) -> Result<SeedReport> {
        let mut report = SeedReport::default();
        let txn = self.db.begin().await?;

        let mut environment_types: HashMap<&str, i32> = HashMap::new();
        for name in ENVIRONMENT_TYPES {
            let existing = entities::EnvironmentType::find()
                .filter(environment_type::Column::Name.eq(name))
                .one(&txn)
                .await?;

            let id = match existing {
                Some(model) => model.id,
                None => {
                    let model = environment_type::ActiveModel {
                        name: Set(name.to_string()),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?;
                    report.environment_types_created += 1;
                    model.id
                }
            };
            environment_types.insert(name, id);
        }

        let now = chrono::Utc::now();
        let mut roles: HashMap<&str, i32> = HashMap::new();
        for seed in ROLES {
            let parent_id = match seed.parent {
                Some(parent) => Some(*roles.get(parent).ok_or_else(|| {
                    KeystoneError::internal(format!(
                        "Role '{}' is seeded before its parent '{}'",
                        seed.name, parent
                    ))
                })?),
                None => None,
            };

            let existing = entities::Role::find()
                .filter(role::Column::Name.eq(seed.name))
                .one(&txn)
                .await?;

            let id = match existing {
                Some(model) => model.id,
                None => {
                    let model = role::ActiveModel {
                        name: Set(seed.name.to_string()),
                        description: Set(seed.description.to_string()),
                        parent_id: Set(parent_id),
                        can_add_member: Set(seed.can_add_member),
                        created_at: Set(now.into()),
                        updated_at: Set(now.into()),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?;
                    report.roles_created += 1;
                    model.id
                }
            };
            roles.insert(seed.name, id);
        }

        for seed in RIGHTS {
            let (Some(role_id), Some(environment_type_id)) = (
                roles.get(seed.role).copied(),
                environment_types.get(seed.environment_type).copied(),
            ) else {
                return Err(KeystoneError::internal(format!(
                    "Rights seed references unknown role '{}' or environment type '{}'",
                    seed.role, seed.environment_type
                )));
            };

            let existing = entities::RolesEnvironmentType::find()
                .filter(roles_environment_type::Column::RoleId.eq(role_id))
                .filter(roles_environment_type::Column::EnvironmentTypeId.eq(environment_type_id))
                .one(&txn)
                .await?;
            if existing.is_some() {
                continue;
            }

            roles_environment_type::ActiveModel {
                role_id: Set(role_id),
                environment_type_id: Set(environment_type_id),
                read: Set(seed.read),
                write: Set(seed.write),
                invite: Set(seed.invite),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            report.rights_created += 1;
        }

        // Checked before commit, the transaction rolls back on error
        let stored = entities::Role::find()
            .order_by_asc(role::Column::Id)
            .all(&txn)
            .await?;
        RoleGraph::from_roles(stored.iter().map(|m| m.to_domain_role())).validate()?;

        txn.commit().await?;
        if !report.is_empty() {
            self.rights_epoch.bump();
        }

        info!(
            "Seeded {} role(s), {} environment type(s), {} rights row(s)",
            report.roles_created, report.environment_types_created, report.rights_created
        );
        Ok(report)
    }

    /// Look up a seeded role by name, failing when seeding never ran
    pub async fn require_role(&self, name: &str) -> Result<Role> {
        self.find_role(&RoleLookup::name(name))
            .await?
            .ok_or_else(|| KeystoneError::not_found(format!("role '{}'", name)))
    }
}
