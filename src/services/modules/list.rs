use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::modules::responses::ModuleListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, server_error, storage_and_user};

pub async fn list_modules(request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
    let (storage, user) = storage_and_user!(request);

    match storage.list_modules_for_owner(course_id, user.id).await {
        Ok(Some(items)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ModuleListResponse { course_id, items },
            "Modules retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(server_error(ErrorCode::InternalServerError, "Failed to list modules", e)),
    }
}
