//! 上传文件存储操作

use super::SeaOrmStorage;
use crate::entity::uploads::{ActiveModel, Column, Entity as Uploads};
use crate::errors::{EducaError, Result};
use crate::models::uploads::entities::Upload;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 记录上传文件
    pub async fn create_upload_impl(&self, upload: Upload) -> Result<Upload> {
        let model = ActiveModel {
            token: Set(upload.token),
            original_name: Set(upload.original_name),
            stored_name: Set(upload.stored_name),
            file_size: Set(upload.file_size),
            file_type: Set(upload.file_type),
            owner_id: Set(upload.owner_id),
            uploaded_at: Set(upload.uploaded_at.timestamp()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EducaError::database_operation(format!("上传文件记录失败: {e}")))?;

        Ok(result.into_upload())
    }

    /// 通过 token 获取当前用户上传的文件
    pub async fn get_upload_for_owner_impl(
        &self,
        token: &str,
        owner_id: i64,
    ) -> Result<Option<Upload>> {
        let result = Uploads::find_by_id(token.to_string())
            .filter(Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(|e| EducaError::database_operation(format!("查询文件失败: {e}")))?;

        Ok(result.map(|m| m.into_upload()))
    }
}
