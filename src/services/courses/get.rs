use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, server_error, storage_and_user};

pub async fn get_course(request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
    let (storage, user) = storage_and_user!(request);

    match storage.get_course_for_owner(course_id, user.id).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(server_error(ErrorCode::InternalServerError, "Failed to load course", e)),
    }
}
