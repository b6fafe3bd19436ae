//! Integration tests for keystone-rights
//!
//! These tests run the rights logic against migrated in-memory SQLite
//! databases, without mocking.

pub mod database_tests;
pub mod membership_tests;
pub mod rights_tests;
pub mod seed_tests;
