//! Rights configuration

use super::*;
use crate::rights::AssignmentPolicy;
use serde::{Deserialize, Serialize};

/// Rights behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RightsConfig {
    /// Whether a member may grant the role they hold themselves
    #[serde(default = "default_true")]
    pub same_role_assignment: bool,
    /// Read-through cache of roles and the rights matrix
    #[serde(default)]
    pub cache: RightsCacheConfig,
    /// Create the reference roles and rights at startup
    #[serde(default)]
    pub seed_defaults: bool,
}

impl Default for RightsConfig {
    fn default() -> Self {
        Self {
            same_role_assignment: true,
            cache: RightsCacheConfig::default(),
            seed_defaults: false,
        }
    }
}

impl RightsConfig {
    pub fn assignment_policy(&self) -> AssignmentPolicy {
        AssignmentPolicy {
            allow_same_role: self.same_role_assignment,
        }
    }

    pub fn merge(mut self, other: Self) -> Self {
        if !other.same_role_assignment {
            self.same_role_assignment = false;
        }
        if other.seed_defaults {
            self.seed_defaults = true;
        }
        self.cache = self.cache.merge(other.cache);
        self
    }
}

/// Rights cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RightsCacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Entry lifetime in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl: u64,
    /// Maximum entries per cache
    #[serde(default = "default_cache_max_capacity")]
    pub max_capacity: u64,
}

impl Default for RightsCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: default_cache_ttl(),
            max_capacity: default_cache_max_capacity(),
        }
    }
}

impl RightsCacheConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = false;
        }
        if other.ttl != default_cache_ttl() {
            self.ttl = other.ttl;
        }
        if other.max_capacity != default_cache_max_capacity() {
            self.max_capacity = other.max_capacity;
        }
        self
    }
}
