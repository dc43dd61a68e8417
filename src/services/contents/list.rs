use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::contents::responses::ModuleContentsResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, server_error, storage_and_user};

pub async fn list_module_contents(
    request: &HttpRequest,
    module_id: i64,
) -> ActixResult<HttpResponse> {
    let (storage, user) = storage_and_user!(request);

    match storage.list_contents_for_owner(module_id, user.id).await {
        Ok(Some((module, items))) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ModuleContentsResponse { module, items },
            "Contents retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ModuleNotFound, "Module not found")),
        Err(e) => Ok(server_error(ErrorCode::InternalServerError, "Failed to list contents", e)),
    }
}
