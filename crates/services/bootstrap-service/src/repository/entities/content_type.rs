//! Content type entity: the kind of object a permission is scoped to.

use sea_orm::entity::prelude::*;

use domain::ContentType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "content_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub app_label: String,
    #[sea_orm(column_name = "model")]
    pub model_name: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::permission::Entity")]
    Permission,
}

impl Related<super::permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Permission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ContentType {
    fn from(model: Model) -> Self {
        ContentType {
            id: model.id,
            app_label: model.app_label,
            model: model.model_name,
            name: model.name,
        }
    }
}
