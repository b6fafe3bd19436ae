//! Services module
//!
//! Operations that combine a rights decision with a write.

pub mod membership;

pub use membership::MembershipService;
