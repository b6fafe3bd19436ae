use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Environment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "environments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    pub project_id: i32,

    pub environment_type_id: i32,

    /// Rotated on every secrets change
    pub version_id: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::environment_type::Entity",
        from = "Column::EnvironmentTypeId",
        to = "super::environment_type::Column::Id"
    )]
    EnvironmentType,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::environment_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EnvironmentType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain_environment(&self) -> crate::core::models::Environment {
        crate::core::models::Environment {
            id: self.id,
            name: self.name.clone(),
            project_id: self.project_id,
            environment_type_id: self.environment_type_id,
            version_id: self.version_id.clone(),
        }
    }
}
