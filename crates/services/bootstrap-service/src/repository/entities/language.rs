//! Language entity.

use sea_orm::entity::prelude::*;

use domain::Language;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "languages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub fullname: String,
    pub nplurals: i32,
    pub pluralequation: String,
    pub specialchars: Option<String>,
    pub directory_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::directory::Entity",
        from = "Column::DirectoryId",
        to = "super::directory::Column::Id"
    )]
    Directory,
}

impl Related<super::directory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Directory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Language {
    fn from(model: Model) -> Self {
        Language {
            id: model.id,
            code: model.code,
            fullname: model.fullname,
            nplurals: u32::try_from(model.nplurals).unwrap_or(0),
            pluralequation: model.pluralequation,
            specialchars: model.specialchars,
            directory_id: model.directory_id,
        }
    }
}
