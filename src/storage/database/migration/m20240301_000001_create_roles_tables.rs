use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Roles::Name).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Roles::Description)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Roles::ParentId).integer().null())
                    .col(
                        ColumnDef::new(Roles::CanAddMember)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Roles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Roles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_roles_parent_id")
                            .from(Roles::Table, Roles::ParentId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EnvironmentTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EnvironmentTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EnvironmentTypes::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RolesEnvironmentTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RolesEnvironmentTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RolesEnvironmentTypes::RoleId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RolesEnvironmentTypes::EnvironmentTypeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RolesEnvironmentTypes::Read)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RolesEnvironmentTypes::Write)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RolesEnvironmentTypes::Invite)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_roles_environment_types_role_id")
                            .from(RolesEnvironmentTypes::Table, RolesEnvironmentTypes::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_roles_environment_types_environment_type_id")
                            .from(
                                RolesEnvironmentTypes::Table,
                                RolesEnvironmentTypes::EnvironmentTypeId,
                            )
                            .to(EnvironmentTypes::Table, EnvironmentTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One matrix row per (role, environment type)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_roles_environment_types_pair")
                    .table(RolesEnvironmentTypes::Table)
                    .col(RolesEnvironmentTypes::RoleId)
                    .col(RolesEnvironmentTypes::EnvironmentTypeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RolesEnvironmentTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EnvironmentTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    Name,
    Description,
    ParentId,
    CanAddMember,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EnvironmentTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum RolesEnvironmentTypes {
    Table,
    Id,
    RoleId,
    EnvironmentTypeId,
    Read,
    Write,
    Invite,
}
