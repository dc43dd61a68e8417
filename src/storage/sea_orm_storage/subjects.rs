//! 学科存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::courses;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{EducaError, Result};
use crate::models::subjects::{
    entities::Subject, requests::CreateSubjectRequest, responses::SubjectSummary,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let model = ActiveModel {
            title: Set(req.title.trim().to_string()),
            slug: Set(req.slug),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EducaError::database_operation(format!("创建学科失败: {e}")))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EducaError::database_operation(format!("查询学科失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn get_subject_by_slug_impl(&self, slug: &str) -> Result<Option<Subject>> {
        let result = Subjects::find()
            .filter(Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| EducaError::database_operation(format!("查询学科失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 按标题列出学科，并统计每个学科下的课程数
    pub async fn list_subjects_with_course_count_impl(&self) -> Result<Vec<SubjectSummary>> {
        let subjects = Subjects::find()
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await
            .map_err(|e| EducaError::database_operation(format!("查询学科列表失败: {e}")))?;

        let counts: HashMap<i64, i64> = courses::Entity::find()
            .select_only()
            .column(courses::Column::SubjectId)
            .column_as(courses::Column::Id.count(), "total")
            .group_by(courses::Column::SubjectId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| EducaError::database_operation(format!("统计课程数失败: {e}")))?
            .into_iter()
            .collect();

        Ok(subjects
            .into_iter()
            .map(|m| {
                let total_courses = counts.get(&m.id).copied().unwrap_or(0);
                SubjectSummary {
                    subject: m.into_subject(),
                    total_courses,
                }
            })
            .collect())
    }
}
