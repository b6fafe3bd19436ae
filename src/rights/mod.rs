//! Role hierarchy and environment rights
//!
//! This module answers two questions:
//!
//! * may a project member read, write or invite on an environment?
//!   ([`can_user_has_right`] and its shorthands)
//! * may a project member grant a role, change another member's role,
//!   add members or remove them? ([`MemberGuard`])
//!
//! All checks read through a [`RightsRepository`]. The SeaORM database
//! implements it directly, and [`CachedRightsRepository`] wraps any
//! implementation with a moka cache.

pub mod cache;
pub mod defaults;
pub mod graph;
pub mod guard;
pub mod matrix;
pub mod repository;
pub mod resolver;


pub use cache::{CachedRightsRepository, RightsEpoch};
pub use graph::RoleGraph;
pub use guard::{AssignmentPolicy, MemberGuard, can_role_add_role, can_user_set_member_role};
pub use matrix::RightsTable;
#[cfg(test)]
pub use repository::MockRightsRepository;
pub use repository::RightsRepository;
pub use resolver::{
    can_user_has_right, can_user_has_right_on_environment, can_user_invite_on_environment,
    can_user_read_environment, can_user_write_on_environment,
};
