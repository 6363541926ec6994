//! Migration: Create the directory tree, languages, projects and static pages.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Directories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Directories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Directories::ParentId).uuid().null())
                    .col(ColumnDef::new(Directories::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Directories::PootlePath)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_directories_parent")
                            .from(Directories::Table, Directories::ParentId)
                            .to(Directories::Table, Directories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Languages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Languages::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Languages::Code)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Languages::Fullname).string().not_null())
                    .col(
                        ColumnDef::new(Languages::Nplurals)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Languages::Pluralequation)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Languages::Specialchars).string().null())
                    .col(ColumnDef::new(Languages::DirectoryId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_languages_directory")
                            .from(Languages::Table, Languages::DirectoryId)
                            .to(Directories::Table, Directories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Projects::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Projects::Code)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Projects::Fullname).string().not_null())
                    .col(ColumnDef::new(Projects::SourceLanguageId).uuid().not_null())
                    .col(ColumnDef::new(Projects::Checkstyle).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Projects::Localfiletype)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Projects::Treestyle).string_len(20).not_null())
                    .col(ColumnDef::new(Projects::DirectoryId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_source_language")
                            .from(Projects::Table, Projects::SourceLanguageId)
                            .to(Languages::Table, Languages::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_directory")
                            .from(Projects::Table, Projects::DirectoryId)
                            .to(Directories::Table, Directories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StaticPages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaticPages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StaticPages::VirtualPath)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(StaticPages::Title).string_len(100).not_null())
                    .col(ColumnDef::new(StaticPages::Body).text().not_null())
                    .col(
                        ColumnDef::new(StaticPages::Active)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StaticPages::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Languages::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Directories::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Directories {
    Table,
    Id,
    ParentId,
    Name,
    PootlePath,
}

#[derive(Iden)]
enum Languages {
    Table,
    Id,
    Code,
    Fullname,
    Nplurals,
    Pluralequation,
    Specialchars,
    DirectoryId,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    Code,
    Fullname,
    SourceLanguageId,
    Checkstyle,
    Localfiletype,
    Treestyle,
    DirectoryId,
}

#[derive(Iden)]
enum StaticPages {
    Table,
    Id,
    VirtualPath,
    Title,
    Body,
    Active,
}
