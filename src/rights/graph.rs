//! Role hierarchy
//!
//! Roles point at the role that manages them through `parent_id`. The
//! children of a role are every role found by walking those links downward,
//! breadth first.

use crate::core::models::{Role, RoleId};
use crate::utils::error::{KeystoneError, Result};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::warn;

/// In-memory index over a set of roles
#[derive(Debug, Clone, Default)]
pub struct RoleGraph {
    roles: HashMap<RoleId, Role>,
    /// parent ID -> IDs of the roles directly below it
    below: HashMap<RoleId, Vec<RoleId>>,
}

impl RoleGraph {
    /// Build the graph from a flat list of roles
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut graph = Self::default();

        for role in roles {
            if let Some(parent_id) = role.parent_id {
                graph.below.entry(parent_id).or_default().push(role.id);
            }
            graph.roles.insert(role.id, role);
        }

        // Deterministic BFS order regardless of input order
        for ids in graph.below.values_mut() {
            ids.sort_unstable();
        }

        graph
    }

    pub fn get(&self, id: RoleId) -> Option<&Role> {
        self.roles.get(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Role> {
        self.roles.values().find(|role| role.name == name)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// All roles ordered by ID
    pub fn roles(&self) -> Vec<&Role> {
        let mut roles: Vec<&Role> = self.roles.values().collect();
        roles.sort_by_key(|role| role.id);
        roles
    }

    /// Roles without a managing role
    pub fn roots(&self) -> Vec<&Role> {
        self.roles()
            .into_iter()
            .filter(|role| role.parent_id.is_none())
            .collect()
    }

    pub fn parent_of(&self, role: &Role) -> Option<&Role> {
        role.parent_id.and_then(|id| self.roles.get(&id))
    }

    /// Every role reachable below `role`, in breadth-first order
    ///
    /// Never contains `role` itself, and terminates on cyclic data.
    pub fn children_of(&self, role: &Role) -> Vec<Role> {
        let mut children = Vec::new();
        let mut visited: HashSet<RoleId> = HashSet::from([role.id]);
        let mut queue: VecDeque<RoleId> = VecDeque::from([role.id]);

        while let Some(current) = queue.pop_front() {
            let Some(ids) = self.below.get(&current) else {
                continue;
            };

            for id in ids {
                if !visited.insert(*id) {
                    if *id == role.id {
                        warn!("Role {} is part of a parent cycle", role);
                    }
                    continue;
                }
                if let Some(child) = self.roles.get(id) {
                    children.push(child.clone());
                }
                queue.push_back(*id);
            }
        }

        children
    }

    /// Whether `role` manages `other`, directly or transitively
    pub fn is_above(&self, role: &Role, other: &Role) -> bool {
        self.children_of(role)
            .iter()
            .any(|child| child.is_same_role(other))
    }

    /// Managing roles of `role`, nearest first
    pub fn ancestors_of(&self, role: &Role) -> Vec<Role> {
        let mut ancestors = Vec::new();
        let mut seen: HashSet<RoleId> = HashSet::from([role.id]);
        let mut current = self.parent_of(role);

        while let Some(parent) = current {
            if !seen.insert(parent.id) {
                break;
            }
            ancestors.push(parent.clone());
            current = self.parent_of(parent);
        }

        ancestors
    }

    /// Check the hierarchy invariants: every parent exists and no role is
    /// its own ancestor.
    pub fn validate(&self) -> Result<()> {
        for role in self.roles() {
            if let Some(parent_id) = role.parent_id {
                if !self.roles.contains_key(&parent_id) {
                    return Err(KeystoneError::validation(format!(
                        "{} has unknown parent role #{}",
                        role, parent_id
                    )));
                }
            }

            let mut seen: HashSet<RoleId> = HashSet::from([role.id]);
            let mut current = role.parent_id;
            while let Some(id) = current {
                if !seen.insert(id) {
                    return Err(KeystoneError::validation(format!(
                        "{} reaches a parent cycle",
                        role
                    )));
                }
                current = self.roles.get(&id).and_then(|r| r.parent_id);
            }
        }

        Ok(())
    }
}
