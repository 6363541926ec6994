//! Join table: permissions granted by a permission set.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "permission_set_grants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub permission_set_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub permission_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::permission_set::Entity",
        from = "Column::PermissionSetId",
        to = "super::permission_set::Column::Id",
        on_delete = "Cascade"
    )]
    PermissionSet,
    #[sea_orm(
        belongs_to = "super::permission::Entity",
        from = "Column::PermissionId",
        to = "super::permission::Column::Id"
    )]
    Permission,
}

impl Related<super::permission_set::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PermissionSet.def()
    }
}

impl Related<super::permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Permission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
