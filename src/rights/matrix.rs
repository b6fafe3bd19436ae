//! Environment-type rights matrix

use crate::core::models::{EnvironmentTypeId, RoleId, RolesEnvironmentType, UserRight};
use std::collections::HashMap;

/// Sparse (role, environment type) -> rights table
///
/// Holds at most one row per pair; a missing pair grants nothing.
#[derive(Debug, Clone, Default)]
pub struct RightsTable {
    rows: HashMap<(RoleId, EnvironmentTypeId), RolesEnvironmentType>,
}

impl RightsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: impl IntoIterator<Item = RolesEnvironmentType>) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.upsert(row);
        }
        table
    }

    /// Insert or replace the row for the pair, returning the previous one
    pub fn upsert(&mut self, row: RolesEnvironmentType) -> Option<RolesEnvironmentType> {
        self.rows
            .insert((row.role_id, row.environment_type_id), row)
    }

    pub fn get(
        &self,
        role_id: RoleId,
        environment_type_id: EnvironmentTypeId,
    ) -> Option<&RolesEnvironmentType> {
        self.rows.get(&(role_id, environment_type_id))
    }

    /// Fail-closed lookup of a single right
    pub fn allows(
        &self,
        role_id: RoleId,
        environment_type_id: EnvironmentTypeId,
        right: UserRight,
    ) -> bool {
        self.get(role_id, environment_type_id)
            .is_some_and(|row| row.allows(right))
    }

    pub fn remove(
        &mut self,
        role_id: RoleId,
        environment_type_id: EnvironmentTypeId,
    ) -> Option<RolesEnvironmentType> {
        self.rows.remove(&(role_id, environment_type_id))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows ordered by role then environment type
    pub fn rows(&self) -> Vec<RolesEnvironmentType> {
        let mut rows: Vec<_> = self.rows.values().copied().collect();
        rows.sort_by_key(|row| (row.role_id, row.environment_type_id));
        rows
    }
}
