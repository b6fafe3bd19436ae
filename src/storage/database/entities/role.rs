use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    /// Role ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Unique role name
    #[sea_orm(unique)]
    pub name: String,

    /// Role description
    pub description: String,

    /// Managing role
    pub parent_id: Option<i32>,

    /// Whether holders may manage members
    pub can_add_member: bool,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Role entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Managing role
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert database model to domain role
    pub fn to_domain_role(&self) -> crate::core::models::Role {
        crate::core::models::Role {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            parent_id: self.parent_id,
            can_add_member: self.can_add_member,
        }
    }
}
