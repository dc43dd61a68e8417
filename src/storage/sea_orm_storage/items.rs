//! 四类条目表的分派操作
//!
//! 内容行只记录 (content_type, object_id)，这里按种类落到对应的表。

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use tracing::warn;

use crate::entity::{contents, item_files, item_images, item_texts, item_videos};
use crate::errors::Result;
use crate::models::contents::{
    entities::{ContentDetail, Item, ItemKind},
    requests::{ItemInput, ItemPayload},
};

/// 按 id（可选再按 owner）查询单个条目
macro_rules! find_item_in {
    ($table:ident, $conn:expr, $id:expr, $owner:expr) => {{
        let mut select = $table::Entity::find_by_id($id);
        if let Some(owner_id) = $owner {
            select = select.filter($table::Column::OwnerId.eq(owner_id));
        }
        select.one($conn).await?.map(|m| m.into_item())
    }};
}

/// 更新 owner 拥有的条目的标题与载荷列
macro_rules! update_item_in {
    ($table:ident, $conn:expr, $id:expr, $owner:expr, $title:expr, $field:ident = $value:expr) => {{
        let found = $table::Entity::find_by_id($id)
            .filter($table::Column::OwnerId.eq($owner))
            .one($conn)
            .await?;
        match found {
            Some(model) => {
                let mut active: $table::ActiveModel = model.into();
                active.title = Set($title);
                active.$field = Set($value);
                active.updated_at = Set(chrono::Utc::now().timestamp());
                Some(active.update($conn).await?.into_item())
            }
            None => None,
        }
    }};
}

/// 批量删除某一类条目
macro_rules! delete_items_in {
    ($table:ident, $conn:expr, $ids:expr) => {
        $table::Entity::delete_many()
            .filter($table::Column::Id.is_in($ids))
            .exec($conn)
            .await?
            .rows_affected
    };
}

/// 批量读取某一类条目
macro_rules! fetch_items_in {
    ($table:ident, $conn:expr, $ids:expr) => {
        $table::Entity::find()
            .filter($table::Column::Id.is_in($ids))
            .all($conn)
            .await?
            .into_iter()
            .map(|m| m.into_item())
            .collect::<Vec<Item>>()
    };
}

pub(super) async fn insert_item<C: ConnectionTrait>(
    conn: &C,
    owner_id: i64,
    input: ItemInput,
) -> Result<Item> {
    let now = chrono::Utc::now().timestamp();
    let title = input.title;

    let item = match input.payload {
        ItemPayload::Text { content } => item_texts::ActiveModel {
            owner_id: Set(owner_id),
            title: Set(title),
            content: Set(content),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?
        .into_item(),
        ItemPayload::File { token } => item_files::ActiveModel {
            owner_id: Set(owner_id),
            title: Set(title),
            file: Set(token),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?
        .into_item(),
        ItemPayload::Image { token } => item_images::ActiveModel {
            owner_id: Set(owner_id),
            title: Set(title),
            file: Set(token),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?
        .into_item(),
        ItemPayload::Video { url } => item_videos::ActiveModel {
            owner_id: Set(owner_id),
            title: Set(title),
            url: Set(url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?
        .into_item(),
    };

    Ok(item)
}

/// `owner_id` 为 None 时不检查所有者
pub(super) async fn find_item<C: ConnectionTrait>(
    conn: &C,
    kind: ItemKind,
    id: i64,
    owner_id: Option<i64>,
) -> Result<Option<Item>> {
    let item = match kind {
        ItemKind::Text => find_item_in!(item_texts, conn, id, owner_id),
        ItemKind::File => find_item_in!(item_files, conn, id, owner_id),
        ItemKind::Image => find_item_in!(item_images, conn, id, owner_id),
        ItemKind::Video => find_item_in!(item_videos, conn, id, owner_id),
    };
    Ok(item)
}

/// 种类由载荷决定
pub(super) async fn update_item<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    owner_id: i64,
    input: ItemInput,
) -> Result<Option<Item>> {
    let title = input.title;
    let item = match input.payload {
        ItemPayload::Text { content } => {
            update_item_in!(item_texts, conn, id, owner_id, title, content = content)
        }
        ItemPayload::File { token } => {
            update_item_in!(item_files, conn, id, owner_id, title, file = token)
        }
        ItemPayload::Image { token } => {
            update_item_in!(item_images, conn, id, owner_id, title, file = token)
        }
        ItemPayload::Video { url } => {
            update_item_in!(item_videos, conn, id, owner_id, title, url = url)
        }
    };
    Ok(item)
}

/// 按种类分组内容行指向的条目 id
fn group_by_kind(rows: &[contents::Model]) -> HashMap<ItemKind, Vec<i64>> {
    let mut groups: HashMap<ItemKind, Vec<i64>> = HashMap::new();
    for row in rows {
        match row.kind() {
            Some(kind) => groups.entry(kind).or_default().push(row.object_id),
            None => warn!(
                "Content {} has unknown content type '{}'",
                row.id, row.content_type
            ),
        }
    }
    groups
}

/// 删除一组内容行指向的条目，返回删除的条目数
pub(super) async fn delete_items_of<C: ConnectionTrait>(
    conn: &C,
    rows: &[contents::Model],
) -> Result<u64> {
    let mut deleted = 0;
    for (kind, ids) in group_by_kind(rows) {
        deleted += match kind {
            ItemKind::Text => delete_items_in!(item_texts, conn, ids),
            ItemKind::File => delete_items_in!(item_files, conn, ids),
            ItemKind::Image => delete_items_in!(item_images, conn, ids),
            ItemKind::Video => delete_items_in!(item_videos, conn, ids),
        };
    }
    Ok(deleted)
}

/// 将有序的内容行解析为带条目的详情，条目缺失的行被跳过
pub(super) async fn resolve_contents<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<contents::Model>,
) -> Result<Vec<ContentDetail>> {
    let mut items: HashMap<(ItemKind, i64), Item> = HashMap::new();
    for (kind, ids) in group_by_kind(&rows) {
        let fetched = match kind {
            ItemKind::Text => fetch_items_in!(item_texts, conn, ids),
            ItemKind::File => fetch_items_in!(item_files, conn, ids),
            ItemKind::Image => fetch_items_in!(item_images, conn, ids),
            ItemKind::Video => fetch_items_in!(item_videos, conn, ids),
        };
        items.extend(fetched.into_iter().map(|item| ((kind, item.id()), item)));
    }

    let mut details = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(kind) = row.kind() else { continue };
        match items.remove(&(kind, row.object_id)) {
            Some(item) => details.push(ContentDetail {
                id: row.id,
                module_id: row.module_id,
                order: row.order,
                item,
            }),
            None => warn!(
                "Content {} points at missing {} item {}",
                row.id, kind, row.object_id
            ),
        }
    }
    Ok(details)
}
