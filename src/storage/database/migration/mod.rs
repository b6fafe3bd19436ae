use sea_orm_migration::prelude::*;

mod m20240301_000001_create_roles_tables;
mod m20240301_000002_create_users_and_organizations_tables;
mod m20240301_000003_create_projects_tables;
mod m20240301_000004_create_project_members_table;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_roles_tables::Migration),
            Box::new(m20240301_000002_create_users_and_organizations_tables::Migration),
            Box::new(m20240301_000003_create_projects_tables::Migration),
            Box::new(m20240301_000004_create_project_members_table::Migration),
        ]
    }
}
