use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project membership database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "project_members")]
pub struct Model {
    /// Membership ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Member
    pub user_id: i32,

    /// Project
    pub project_id: i32,

    /// Role held on the project
    pub role_id: i32,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Project member entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to user relation
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    /// Belongs to project relation
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
    /// Held role relation
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id"
    )]
    Role,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to a domain membership, `role` being the loaded role row
    pub fn to_domain_member(&self, role: &super::role::Model) -> crate::core::models::ProjectMember {
        crate::core::models::ProjectMember {
            id: self.id,
            user_id: self.user_id,
            project_id: self.project_id,
            role_id: self.role_id,
            role: role.to_domain_role(),
        }
    }
}
