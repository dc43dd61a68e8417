//! 内容实体，content_type + object_id 指向四张条目表之一

use sea_orm::entity::prelude::*;

use crate::models::contents::entities::{Content, ItemKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub module_id: i64,
    pub content_type: String,
    pub object_id: i64,
    pub order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::modules::Entity",
        from = "Column::ModuleId",
        to = "super::modules::Column::Id"
    )]
    Module,
}

impl Related<super::modules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 存储的种类名不在四类之中时返回 None
    pub fn kind(&self) -> Option<ItemKind> {
        self.content_type.parse().ok()
    }

    pub fn into_content(self) -> Option<Content> {
        Some(Content {
            content_type: self.kind()?,
            id: self.id,
            module_id: self.module_id,
            object_id: self.object_id,
            order: self.order,
        })
    }
}
