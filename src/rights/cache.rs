//! Read-through cache over a rights repository
//!
//! Roles and matrix rows change rarely compared to how often they are read.
//! Memberships are never cached: they change with every add/remove.
//!
//! Every entry is stamped with the [`RightsEpoch`] current when its load
//! started. A write to roles or rights bumps the epoch, and entries carrying
//! an older stamp are reloaded. The database shares its epoch with the cache
//! built over it, so writes made directly on the database are seen too.

use super::repository::RightsRepository;
use crate::config::RightsCacheConfig;
use crate::core::models::{
    EnvironmentTypeId, ProjectId, ProjectMember, Role, RoleId, RoleLookup, RolesEnvironmentType,
    UserId,
};
use crate::storage::database::Database;
use crate::utils::error::{KeystoneError, Result};
use async_trait::async_trait;
use moka::future::Cache;
use std::future::Future;
use std::hash::Hash;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Change counter of roles and the rights matrix
#[derive(Debug, Clone, Default)]
pub struct RightsEpoch(Arc<AtomicU64>);

impl RightsEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Mark every cached entry stale. Call after the write is committed.
    pub fn bump(&self) {
        self.0.fetch_add(1, Ordering::AcqRel);
    }
}

type Stamped<T> = (u64, T);

/// Repository wrapper caching roles, role children and matrix rows
pub struct CachedRightsRepository<R> {
    inner: R,
    epoch: RightsEpoch,
    roles: Cache<(), Stamped<Vec<Role>>>,
    children: Cache<RoleId, Stamped<Vec<Role>>>,
    rights: Cache<(RoleId, EnvironmentTypeId), Stamped<Option<RolesEnvironmentType>>>,
}

impl<R: RightsRepository> CachedRightsRepository<R> {
    pub fn new(inner: R, config: &RightsCacheConfig) -> Self {
        let ttl = Duration::from_secs(config.ttl);

        Self {
            inner,
            epoch: RightsEpoch::new(),
            roles: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            children: Cache::builder()
                .max_capacity(config.max_capacity)
                .time_to_live(ttl)
                .build(),
            rights: Cache::builder()
                .max_capacity(config.max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Follow an epoch bumped by the writer of the underlying data
    pub fn with_epoch(mut self, epoch: RightsEpoch) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Drop every cached entry. Call after any change to roles or rights.
    pub fn invalidate(&self) {
        debug!("Invalidating rights cache");
        self.epoch.bump();
        self.roles.invalidate_all();
        self.children.invalidate_all();
        self.rights.invalidate_all();
    }

    async fn read_through<K, V, L, F>(
        &self,
        cache: &Cache<K, Stamped<V>>,
        key: K,
        load: L,
    ) -> Result<V>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
        L: FnOnce() -> F,
        F: Future<Output = Result<V>>,
    {
        let epoch = self.epoch.current();
        if let Some((stamp, value)) = cache.get(&key).await {
            if stamp == epoch {
                return Ok(value);
            }
        }

        let value = load().await?;
        cache.insert(key, (epoch, value.clone())).await;
        Ok(value)
    }
}

#[async_trait]
impl<R: RightsRepository> RightsRepository for CachedRightsRepository<R> {
    async fn get_role(&self, lookup: RoleLookup) -> Result<Role> {
        let roles = self.get_roles().await?;
        let found = match &lookup {
            RoleLookup::Id(id) => roles.into_iter().find(|role| role.id == *id),
            RoleLookup::Name(name) => roles.into_iter().find(|role| role.name == *name),
        };

        found.ok_or_else(|| KeystoneError::not_found(lookup.to_string()))
    }

    async fn get_roles(&self) -> Result<Vec<Role>> {
        self.read_through(&self.roles, (), || self.inner.get_roles())
            .await
    }

    async fn get_children_roles(&self, role: &Role) -> Result<Vec<Role>> {
        self.read_through(&self.children, role.id, || {
            self.inner.get_children_roles(role)
        })
        .await
    }

    async fn get_roles_environment_type(
        &self,
        role_id: RoleId,
        environment_type_id: EnvironmentTypeId,
    ) -> Result<Option<RolesEnvironmentType>> {
        // Absence is cached too, it is a fact about the matrix
        self.read_through(
            &self.rights,
            (role_id, environment_type_id),
            || {
                self.inner
                    .get_roles_environment_type(role_id, environment_type_id)
            },
        )
        .await
    }

    async fn get_project_member(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> Result<ProjectMember> {
        self.inner.get_project_member(user_id, project_id).await
    }

    async fn get_project_owner(&self, project_id: ProjectId) -> Result<Option<UserId>> {
        self.inner.get_project_owner(project_id).await
    }
}

impl<R> CachedRightsRepository<R>
where
    R: Deref<Target = Database> + RightsRepository,
{
    /// Create a role through the cache, invalidating it
    pub async fn create_role(&self, role: &Role) -> Result<Role> {
        let created = self.inner.create_role(role).await?;
        self.invalidate();
        Ok(created)
    }

    /// Write a matrix row through the cache, invalidating it
    pub async fn upsert_roles_environment_type(
        &self,
        row: &RolesEnvironmentType,
    ) -> Result<RolesEnvironmentType> {
        let saved = self.inner.upsert_roles_environment_type(row).await?;
        self.invalidate();
        Ok(saved)
    }
}
