//! Common test utilities for keystone-rights
//!
//! ```rust,ignore
//! use crate::common::{TestDatabase, Team};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let team = Team::new().await;
//!     // ...
//! }
//! ```


// Re-export commonly used items
pub use database::TestDatabase;
pub use fixtures::Team;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
