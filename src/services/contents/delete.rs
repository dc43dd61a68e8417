use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, server_error, storage_and_user};

/// 删除内容行及其指向的条目
pub async fn delete_content(request: &HttpRequest, content_id: i64) -> ActixResult<HttpResponse> {
    let (storage, user) = storage_and_user!(request);

    match storage.delete_content_for_owner(content_id, user.id).await {
        Ok(true) => {
            tracing::info!("User {} deleted content {}", user.id, content_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Content deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ContentNotFound, "Content not found")),
        Err(e) => Ok(server_error(ErrorCode::ContentDeleteFailed, "Failed to delete content", e)),
    }
}
