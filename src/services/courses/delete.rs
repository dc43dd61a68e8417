use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, server_error, storage_and_user};

pub async fn delete_course(request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
    let (storage, user) = storage_and_user!(request);

    match storage.delete_course_for_owner(course_id, user.id).await {
        Ok(true) => {
            tracing::info!("User {} deleted course {}", user.id, course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Course deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(server_error(ErrorCode::CourseDeleteFailed, "Failed to delete course", e)),
    }
}
