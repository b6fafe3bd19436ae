//! Roles and role lookups

use super::RoleId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named privilege level assigned to project members
///
/// `parent_id` points at the role directly above this one, the role that
/// manages it. The top of a chain (admin) has no parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    /// Role ID
    pub id: RoleId,
    /// Unique role name
    pub name: String,
    /// Human readable description
    #[serde(default)]
    pub description: String,
    /// Managing role, if any
    pub parent_id: Option<RoleId>,
    /// Whether members holding this role may manage other members at all
    pub can_add_member: bool,
}

impl Role {
    /// Create a role without parent that cannot manage members
    pub fn new(id: RoleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            parent_id: None,
            can_add_member: false,
        }
    }

    /// Set the managing role
    pub fn with_parent(mut self, parent_id: RoleId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the member management flag
    pub fn with_can_add_member(mut self, can_add_member: bool) -> Self {
        self.can_add_member = can_add_member;
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Roles are identified by ID, names are only a convenience
    pub fn is_same_role(&self, other: &Role) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

/// How to find a single role
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoleLookup {
    /// By primary key
    Id(RoleId),
    /// By unique name
    Name(String),
}

impl RoleLookup {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl From<RoleId> for RoleLookup {
    fn from(id: RoleId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for RoleLookup {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl fmt::Display for RoleLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleLookup::Id(id) => write!(f, "role #{}", id),
            RoleLookup::Name(name) => write!(f, "role '{}'", name),
        }
    }
}
