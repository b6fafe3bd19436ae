use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Environment type database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "environment_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain_environment_type(&self) -> crate::core::models::EnvironmentType {
        crate::core::models::EnvironmentType::new(self.id, self.name.clone())
    }
}
