use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rights matrix row: what a role may do on an environment type
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "roles_environment_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub role_id: i32,

    pub environment_type_id: i32,

    pub read: bool,

    pub write: bool,

    pub invite: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id",
        on_delete = "Cascade"
    )]
    Role,
    #[sea_orm(
        belongs_to = "super::environment_type::Entity",
        from = "Column::EnvironmentTypeId",
        to = "super::environment_type::Column::Id",
        on_delete = "Cascade"
    )]
    EnvironmentType,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<super::environment_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EnvironmentType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain_rights(&self) -> crate::core::models::RolesEnvironmentType {
        crate::core::models::RolesEnvironmentType::new(
            self.role_id,
            self.environment_type_id,
            self.read,
            self.write,
            self.invite,
        )
    }
}
