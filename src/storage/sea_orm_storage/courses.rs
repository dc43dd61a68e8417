//! 课程存储操作

use super::{SeaOrmStorage, items};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::{contents, modules};
use crate::errors::{EducaError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    courses::{
        entities::Course,
        requests::{CourseForm, CourseListQuery},
        responses::CourseListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 查询 owner 拥有的课程
pub(super) async fn find_owned_course<C: ConnectionTrait>(
    conn: &C,
    course_id: i64,
    owner_id: i64,
) -> Result<Option<crate::entity::courses::Model>> {
    Ok(Courses::find_by_id(course_id)
        .filter(Column::OwnerId.eq(owner_id))
        .one(conn)
        .await?)
}

impl SeaOrmStorage {
    /// 创建课程，所有者为当前用户
    pub async fn create_course_impl(&self, owner_id: i64, form: CourseForm) -> Result<Course> {
        let model = ActiveModel {
            owner_id: Set(owner_id),
            subject_id: Set(form.subject_id),
            title: Set(form.title.trim().to_string()),
            slug: Set(form.slug),
            overview: Set(form.overview),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EducaError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    pub async fn course_slug_taken_impl(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool> {
        let mut select = Courses::find().filter(Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| EducaError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(count > 0)
    }

    pub async fn get_course_for_owner_impl(
        &self,
        course_id: i64,
        owner_id: i64,
    ) -> Result<Option<Course>> {
        let result = find_owned_course(&self.db, course_id, owner_id)
            .await
            .map_err(|e| EducaError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出当前用户的课程，最新创建的在前
    pub async fn list_courses_for_owner_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let (page, size) = PaginationQuery::clamped(query.page, query.size);

        let mut select = Courses::find().filter(Column::OwnerId.eq(query.owner_id));

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Column::Title.like(LikeExpr::new(format!("%{escaped}%")).escape('\\')),
            );
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EducaError::database_operation(format!("查询课程总数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EducaError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 整表更新课程
    pub async fn update_course_for_owner_impl(
        &self,
        course_id: i64,
        owner_id: i64,
        form: CourseForm,
    ) -> Result<Option<Course>> {
        let Some(existing) = find_owned_course(&self.db, course_id, owner_id).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.subject_id = Set(form.subject_id);
        model.title = Set(form.title.trim().to_string());
        model.slug = Set(form.slug);
        model.overview = Set(form.overview);

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| EducaError::database_operation(format!("更新课程失败: {e}")))?;

        Ok(Some(updated.into_course()))
    }

    /// 删除课程，连同模块、内容行以及内容引用的条目
    pub async fn delete_course_for_owner_impl(
        &self,
        course_id: i64,
        owner_id: i64,
    ) -> Result<bool> {
        let txn = self.db.begin().await?;

        if find_owned_course(&txn, course_id, owner_id).await?.is_none() {
            return Ok(false);
        }

        let module_ids: Vec<i64> = modules::Entity::find()
            .select_only()
            .column(modules::Column::Id)
            .filter(modules::Column::CourseId.eq(course_id))
            .into_tuple()
            .all(&txn)
            .await?;

        let rows = contents::Entity::find()
            .filter(contents::Column::ModuleId.is_in(module_ids.clone()))
            .all(&txn)
            .await?;
        let items_deleted = items::delete_items_of(&txn, &rows).await?;

        contents::Entity::delete_many()
            .filter(contents::Column::ModuleId.is_in(module_ids))
            .exec(&txn)
            .await?;
        modules::Entity::delete_many()
            .filter(modules::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await?;
        Courses::delete_by_id(course_id).exec(&txn).await?;

        txn.commit()
            .await
            .map_err(|e| EducaError::database_operation(format!("删除课程失败: {e}")))?;

        tracing::debug!(
            "Deleted course {} with {} content items",
            course_id,
            items_deleted
        );
        Ok(true)
    }
}
