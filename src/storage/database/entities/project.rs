use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    /// Project ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Public identifier
    #[sea_orm(unique)]
    pub uuid: String,

    /// Project name
    pub name: String,

    /// Owning organization
    pub organization_id: Option<i32>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Project entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to organization relation
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id",
        on_delete = "SetNull"
    )]
    Organization,
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert database model to domain project
    pub fn to_domain_project(&self) -> crate::core::models::Project {
        crate::core::models::Project {
            id: self.id,
            uuid: self.uuid.clone(),
            name: self.name.clone(),
            organization_id: self.organization_id,
        }
    }
}
