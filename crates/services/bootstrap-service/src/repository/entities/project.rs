//! Project entity.

use sea_orm::entity::prelude::*;

use domain::Project;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub fullname: String,
    pub source_language_id: Uuid,
    pub checkstyle: String,
    pub localfiletype: String,
    pub treestyle: String,
    pub directory_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::language::Entity",
        from = "Column::SourceLanguageId",
        to = "super::language::Column::Id"
    )]
    SourceLanguage,
    #[sea_orm(
        belongs_to = "super::directory::Entity",
        from = "Column::DirectoryId",
        to = "super::directory::Column::Id"
    )]
    Directory,
}

impl Related<super::language::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SourceLanguage.def()
    }
}

impl Related<super::directory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Directory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Project {
    fn from(model: Model) -> Self {
        Project {
            id: model.id,
            code: model.code,
            fullname: model.fullname,
            source_language_id: model.source_language_id,
            checkstyle: model.checkstyle,
            localfiletype: model.localfiletype,
            treestyle: model.treestyle,
            directory_id: model.directory_id,
        }
    }
}
