//! Users

use super::UserId;
use serde::{Deserialize, Serialize};

/// A Keystone account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Public handle, e.g. `alice@github`
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn new(id: UserId, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self {
            id,
            username: user_id.clone(),
            user_id,
            email: String::new(),
        }
    }
}
