//! 模块存储操作

use super::courses::find_owned_course;
use super::ordering::assign_order;
use super::{SeaOrmStorage, items};
use crate::entity::modules::{ActiveModel, Column, Entity as Modules};
use crate::entity::{contents, courses};
use crate::errors::{EducaError, Result};
use crate::models::{
    ReorderOutcome,
    modules::{entities::Module, requests::ModuleFormsetPlan},
};
use sea_orm::sea_query::{Expr, SelectStatement};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Set, TransactionTrait,
};
use std::collections::HashSet;

/// owner 拥有的课程 id 子查询
pub(super) fn owned_course_ids(owner_id: i64) -> SelectStatement {
    courses::Entity::find()
        .select_only()
        .column(courses::Column::Id)
        .filter(courses::Column::OwnerId.eq(owner_id))
        .into_query()
}

/// 查询 owner 拥有的模块（经由课程）
pub(super) async fn find_owned_module<C: ConnectionTrait>(
    conn: &C,
    module_id: i64,
    owner_id: i64,
) -> Result<Option<crate::entity::modules::Model>> {
    Ok(Modules::find_by_id(module_id)
        .inner_join(courses::Entity)
        .filter(courses::Column::OwnerId.eq(owner_id))
        .one(conn)
        .await?)
}

async fn insert_module<C: ConnectionTrait>(
    conn: &C,
    course_id: i64,
    title: String,
    description: String,
    order: Option<i32>,
) -> Result<crate::entity::modules::Model> {
    let order = assign_order::<Modules, _>(conn, order, vec![course_id.into()]).await?;

    let model = ActiveModel {
        course_id: Set(course_id),
        title: Set(title),
        description: Set(description),
        order: Set(order),
        ..Default::default()
    };

    Ok(model.insert(conn).await?)
}

async fn modules_of_course<C: ConnectionTrait>(conn: &C, course_id: i64) -> Result<Vec<Module>> {
    let rows = Modules::find()
        .filter(Column::CourseId.eq(course_id))
        .order_by_asc(Column::Order)
        .order_by_asc(Column::Id)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(|m| m.into_module()).collect())
}

impl SeaOrmStorage {
    pub async fn create_module_impl(
        &self,
        course_id: i64,
        title: String,
        description: String,
        order: Option<i32>,
    ) -> Result<Module> {
        let result = insert_module(&self.db, course_id, title, description, order)
            .await
            .map_err(|e| EducaError::database_operation(format!("创建模块失败: {e}")))?;

        Ok(result.into_module())
    }

    pub async fn list_modules_for_owner_impl(
        &self,
        course_id: i64,
        owner_id: i64,
    ) -> Result<Option<Vec<Module>>> {
        if find_owned_course(&self.db, course_id, owner_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let modules = modules_of_course(&self.db, course_id)
            .await
            .map_err(|e| EducaError::database_operation(format!("查询模块列表失败: {e}")))?;

        Ok(Some(modules))
    }

    pub async fn get_module_for_owner_impl(
        &self,
        module_id: i64,
        owner_id: i64,
    ) -> Result<Option<Module>> {
        let result = find_owned_module(&self.db, module_id, owner_id)
            .await
            .map_err(|e| EducaError::database_operation(format!("查询模块失败: {e}")))?;

        Ok(result.map(|m| m.into_module()))
    }

    /// 在一个事务中执行表单集：先删除，再修改，最后按提交顺序追加新模块
    pub async fn apply_module_formset_impl(
        &self,
        course_id: i64,
        owner_id: i64,
        plan: ModuleFormsetPlan,
    ) -> Result<Option<Vec<Module>>> {
        let txn = self.db.begin().await?;

        if find_owned_course(&txn, course_id, owner_id).await?.is_none() {
            return Ok(None);
        }

        // 计划中的 id 只在本课程的模块范围内生效
        let course_module_ids: HashSet<i64> = Modules::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::CourseId.eq(course_id))
            .into_tuple::<i64>()
            .all(&txn)
            .await?
            .into_iter()
            .collect();

        let deletes: Vec<i64> = plan
            .deletes
            .into_iter()
            .filter(|id| course_module_ids.contains(id))
            .collect();

        if !deletes.is_empty() {
            let rows = contents::Entity::find()
                .filter(contents::Column::ModuleId.is_in(deletes.clone()))
                .all(&txn)
                .await?;
            items::delete_items_of(&txn, &rows).await?;
            contents::Entity::delete_many()
                .filter(contents::Column::ModuleId.is_in(deletes.clone()))
                .exec(&txn)
                .await?;
            Modules::delete_many()
                .filter(Column::Id.is_in(deletes))
                .exec(&txn)
                .await?;
        }

        for (id, title, description) in plan.updates {
            if !course_module_ids.contains(&id) {
                continue;
            }
            Modules::update_many()
                .col_expr(Column::Title, Expr::value(title))
                .col_expr(Column::Description, Expr::value(description))
                .filter(Column::Id.eq(id))
                .exec(&txn)
                .await?;
        }

        for (title, description) in plan.creates {
            insert_module(&txn, course_id, title, description, None).await?;
        }

        let modules = modules_of_course(&txn, course_id).await?;
        txn.commit()
            .await
            .map_err(|e| EducaError::database_operation(format!("保存模块失败: {e}")))?;

        Ok(Some(modules))
    }

    /// 逐个更新 order，只更新 owner 拥有的模块，每条更新独立执行
    pub async fn reorder_modules_for_owner_impl(
        &self,
        owner_id: i64,
        pairs: Vec<(i64, i32)>,
    ) -> Result<Vec<ReorderOutcome>> {
        let owned_courses = owned_course_ids(owner_id);

        let mut results = Vec::with_capacity(pairs.len());
        for (id, order) in pairs {
            let result = Modules::update_many()
                .col_expr(Column::Order, Expr::value(order))
                .filter(Column::Id.eq(id))
                .filter(Column::CourseId.in_subquery(owned_courses.clone()))
                .exec(&self.db)
                .await
                .map_err(|e| EducaError::database_operation(format!("更新模块顺序失败: {e}")))?;

            results.push(ReorderOutcome {
                id,
                updated: result.rows_affected > 0,
            });
        }
        Ok(results)
    }
}
