//! Migration: Create content types, permissions and permission sets.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContentTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentTypes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContentTypes::AppLabel).string_len(100).not_null())
                    .col(ColumnDef::new(ContentTypes::Model).string_len(100).not_null())
                    .col(ColumnDef::new(ContentTypes::Name).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_content_types_app_label_model")
                    .table(ContentTypes::Table)
                    .col(ContentTypes::AppLabel)
                    .col(ContentTypes::Model)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Permissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Permissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Permissions::ContentTypeId).uuid().not_null())
                    .col(ColumnDef::new(Permissions::Codename).string_len(100).not_null())
                    .col(ColumnDef::new(Permissions::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permissions_content_type")
                            .from(Permissions::Table, Permissions::ContentTypeId)
                            .to(ContentTypes::Table, ContentTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_permissions_content_type_codename")
                    .table(Permissions::Table)
                    .col(Permissions::ContentTypeId)
                    .col(Permissions::Codename)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PermissionSets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PermissionSets::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PermissionSets::UserId).uuid().not_null())
                    .col(ColumnDef::new(PermissionSets::DirectoryId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_sets_user")
                            .from(PermissionSets::Table, PermissionSets::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_sets_directory")
                            .from(PermissionSets::Table, PermissionSets::DirectoryId)
                            .to(Directories::Table, Directories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_permission_sets_user_directory")
                    .table(PermissionSets::Table)
                    .col(PermissionSets::UserId)
                    .col(PermissionSets::DirectoryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PermissionSetGrants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PermissionSetGrants::PermissionSetId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PermissionSetGrants::PermissionId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PermissionSetGrants::PermissionSetId)
                            .col(PermissionSetGrants::PermissionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_set_grants_set")
                            .from(PermissionSetGrants::Table, PermissionSetGrants::PermissionSetId)
                            .to(PermissionSets::Table, PermissionSets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_set_grants_permission")
                            .from(PermissionSetGrants::Table, PermissionSetGrants::PermissionId)
                            .to(Permissions::Table, Permissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PermissionSetGrants::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(PermissionSets::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Permissions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ContentTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContentTypes {
    Table,
    Id,
    AppLabel,
    Model,
    Name,
}

#[derive(Iden)]
enum Permissions {
    Table,
    Id,
    ContentTypeId,
    Codename,
    Name,
}

#[derive(Iden)]
enum PermissionSets {
    Table,
    Id,
    UserId,
    DirectoryId,
}

#[derive(Iden)]
enum PermissionSetGrants {
    Table,
    PermissionSetId,
    PermissionId,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Directories {
    Table,
    Id,
}
