//! 内容存储操作

use super::modules::{find_owned_module, owned_course_ids};
use super::ordering::assign_order;
use super::{SeaOrmStorage, items};
use crate::entity::contents::{ActiveModel, Column, Entity as Contents};
use crate::entity::{courses, modules};
use crate::errors::{EducaError, Result};
use crate::models::{
    ReorderOutcome,
    contents::{
        entities::{Content, ContentDetail, Item, ItemKind},
        requests::ItemInput,
    },
    modules::entities::Module,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 模块及其有序内容
    pub async fn list_contents_for_owner_impl(
        &self,
        module_id: i64,
        owner_id: i64,
    ) -> Result<Option<(Module, Vec<ContentDetail>)>> {
        let Some(module) = find_owned_module(&self.db, module_id, owner_id).await? else {
            return Ok(None);
        };

        let rows = Contents::find()
            .filter(Column::ModuleId.eq(module_id))
            .order_by_asc(Column::Order)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EducaError::database_operation(format!("查询内容列表失败: {e}")))?;

        let details = items::resolve_contents(&self.db, rows).await?;
        Ok(Some((module.into_module(), details)))
    }

    /// 创建条目并追加到模块末尾
    pub async fn create_content_for_owner_impl(
        &self,
        module_id: i64,
        owner_id: i64,
        input: ItemInput,
    ) -> Result<Option<(Content, Item)>> {
        let txn = self.db.begin().await?;

        if find_owned_module(&txn, module_id, owner_id).await?.is_none() {
            return Ok(None);
        }

        let item = items::insert_item(&txn, owner_id, input).await?;
        let order = assign_order::<Contents, _>(&txn, None, vec![module_id.into()]).await?;

        let row = ActiveModel {
            module_id: Set(module_id),
            content_type: Set(item.kind().to_string()),
            object_id: Set(item.id()),
            order: Set(order),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit()
            .await
            .map_err(|e| EducaError::database_operation(format!("创建内容失败: {e}")))?;

        let content = row
            .into_content()
            .ok_or_else(|| EducaError::database_operation("内容类型无效"))?;
        Ok(Some((content, item)))
    }

    pub async fn get_item_for_owner_impl(
        &self,
        kind: ItemKind,
        item_id: i64,
        owner_id: i64,
    ) -> Result<Option<Item>> {
        items::find_item(&self.db, kind, item_id, Some(owner_id))
            .await
            .map_err(|e| EducaError::database_operation(format!("查询条目失败: {e}")))
    }

    pub async fn update_item_for_owner_impl(
        &self,
        item_id: i64,
        owner_id: i64,
        input: ItemInput,
    ) -> Result<Option<Item>> {
        items::update_item(&self.db, item_id, owner_id, input)
            .await
            .map_err(|e| EducaError::database_operation(format!("更新条目失败: {e}")))
    }

    /// 删除内容行及其条目（经由模块、课程检查所有者）
    pub async fn delete_content_for_owner_impl(
        &self,
        content_id: i64,
        owner_id: i64,
    ) -> Result<bool> {
        let txn = self.db.begin().await?;

        let Some(row) = Contents::find_by_id(content_id)
            .join(JoinType::InnerJoin, crate::entity::contents::Relation::Module.def())
            .join(JoinType::InnerJoin, modules::Relation::Course.def())
            .filter(courses::Column::OwnerId.eq(owner_id))
            .one(&txn)
            .await?
        else {
            return Ok(false);
        };

        items::delete_items_of(&txn, std::slice::from_ref(&row)).await?;
        Contents::delete_by_id(row.id).exec(&txn).await?;

        txn.commit()
            .await
            .map_err(|e| EducaError::database_operation(format!("删除内容失败: {e}")))?;

        Ok(true)
    }

    /// 逐个更新 order，只更新 owner 拥有的内容，每条更新独立执行
    pub async fn reorder_contents_for_owner_impl(
        &self,
        owner_id: i64,
        pairs: Vec<(i64, i32)>,
    ) -> Result<Vec<ReorderOutcome>> {
        let owned_modules = modules::Entity::find()
            .select_only()
            .column(modules::Column::Id)
            .filter(modules::Column::CourseId.in_subquery(owned_course_ids(owner_id)))
            .into_query();

        let mut results = Vec::with_capacity(pairs.len());
        for (id, order) in pairs {
            let result = Contents::update_many()
                .col_expr(Column::Order, Expr::value(order))
                .filter(Column::Id.eq(id))
                .filter(Column::ModuleId.in_subquery(owned_modules.clone()))
                .exec(&self.db)
                .await
                .map_err(|e| EducaError::database_operation(format!("更新内容顺序失败: {e}")))?;

            results.push(ReorderOutcome {
                id,
                updated: result.rows_affected > 0,
            });
        }
        Ok(results)
    }
}
