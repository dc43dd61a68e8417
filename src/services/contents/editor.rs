//! 条目编辑：按种类新建或修改 text / file / image / video 条目

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::path::Path;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::contents::{
    entities::ItemKind,
    requests::{ItemForm, ItemInput, ItemPayload},
    responses::ItemSavedResponse,
};
use crate::models::{ApiResponse, ErrorCode, FieldError};
use crate::services::{not_found, server_error, storage_and_user, validation_failed};
use crate::storage::Storage;

/// 引用的上传必须属于当前用户；image 条目还要求图片扩展名
async fn check_upload(
    storage: &Arc<dyn Storage>,
    owner_id: i64,
    payload: &ItemPayload,
) -> Result<(), HttpResponse> {
    let Some(token) = payload.upload_token() else {
        return Ok(());
    };

    let upload = match storage.get_upload_for_owner(token, owner_id).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            return Err(validation_failed(vec![FieldError::new(
                "file",
                "Select a valid uploaded file",
            )]));
        }
        Err(e) => return Err(server_error(ErrorCode::ContentSaveFailed, "Failed to load upload", e)),
    };

    if matches!(payload, ItemPayload::Image { .. }) {
        let extension = Path::new(&upload.original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        if !AppConfig::get().upload.is_image_extension(&extension) {
            return Err(validation_failed(vec![FieldError::new(
                "file",
                "Upload a valid image",
            )]));
        }
    }

    Ok(())
}

async fn validated_input(
    storage: &Arc<dyn Storage>,
    owner_id: i64,
    kind: ItemKind,
    form: ItemForm,
) -> Result<ItemInput, HttpResponse> {
    let input = form.validate(kind).map_err(validation_failed)?;
    check_upload(storage, owner_id, &input.payload).await?;
    Ok(input)
}

pub async fn create_item(
    request: &HttpRequest,
    module_id: i64,
    kind: ItemKind,
    form: ItemForm,
) -> ActixResult<HttpResponse> {
    let (storage, user) = storage_and_user!(request);

    match storage.get_module_for_owner(module_id, user.id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::ModuleNotFound, "Module not found")),
        Err(e) => return Ok(server_error(ErrorCode::ContentSaveFailed, "Failed to save content", e)),
    }

    let input = match validated_input(&storage, user.id, kind, form).await {
        Ok(input) => input,
        Err(response) => return Ok(response),
    };

    match storage.create_content_for_owner(module_id, user.id, input).await {
        Ok(Some((content, item))) => {
            tracing::info!(
                "User {} added {} content {} to module {}",
                user.id,
                kind,
                content.id,
                module_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ItemSavedResponse {
                    content_id: Some(content.id),
                    item,
                },
                "Content created successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::ModuleNotFound, "Module not found")),
        Err(e) => Ok(server_error(ErrorCode::ContentSaveFailed, "Failed to save content", e)),
    }
}

pub async fn update_item(
    request: &HttpRequest,
    module_id: i64,
    kind: ItemKind,
    item_id: i64,
    form: ItemForm,
) -> ActixResult<HttpResponse> {
    let (storage, user) = storage_and_user!(request);

    match storage.get_module_for_owner(module_id, user.id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::ModuleNotFound, "Module not found")),
        Err(e) => return Ok(server_error(ErrorCode::ContentSaveFailed, "Failed to save content", e)),
    }

    let input = match validated_input(&storage, user.id, kind, form).await {
        Ok(input) => input,
        Err(response) => return Ok(response),
    };

    match storage.update_item_for_owner(item_id, user.id, input).await {
        Ok(Some(item)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ItemSavedResponse {
                content_id: None,
                item,
            },
            "Content updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ItemNotFound, "Item not found")),
        Err(e) => Ok(server_error(ErrorCode::ContentSaveFailed, "Failed to save content", e)),
    }
}
