//! 文件条目，file 为上传 token

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "item_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub file: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_item(self) -> crate::models::contents::entities::Item {
        use crate::models::contents::entities::{Item, ItemBase, FileItem};
        use chrono::{DateTime, Utc};

        Item::File(FileItem {
            base: ItemBase {
                id: self.id,
                owner_id: self.owner_id,
                title: self.title,
                created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
                updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
            },
            file: self.file,
        })
    }
}
