//! Static page entity, used for announcements.

use sea_orm::entity::prelude::*;

use domain::Announcement;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "static_pages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub virtual_path: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Announcement {
    fn from(model: Model) -> Self {
        Announcement {
            id: model.id,
            virtual_path: model.virtual_path,
            title: model.title,
            body: model.body,
            active: model.active,
        }
    }
}
