use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Public handle
    #[sea_orm(unique)]
    pub user_id: String,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert database model to domain user
    pub fn to_domain_user(&self) -> crate::core::models::User {
        crate::core::models::User {
            id: self.id,
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}
