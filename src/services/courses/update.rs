use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::courses::requests::CourseForm;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, server_error, storage_and_user};

use super::{check_form, is_unique_violation, slug_conflict};

pub async fn update_course(
    request: &HttpRequest,
    course_id: i64,
    mut form: CourseForm,
) -> ActixResult<HttpResponse> {
    let (storage, user) = storage_and_user!(request);

    // 先确认所有权，避免对他人课程泄露校验信息
    match storage.get_course_for_owner(course_id, user.id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => return Ok(server_error(ErrorCode::CourseUpdateFailed, "Failed to update course", e)),
    }

    if let Err(response) =
        check_form(&storage, &mut form, Some(course_id), ErrorCode::CourseUpdateFailed).await
    {
        return Ok(response);
    }

    match storage.update_course_for_owner(course_id, user.id, form).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) if is_unique_violation(&e) => Ok(slug_conflict()),
        Err(e) => Ok(server_error(ErrorCode::CourseUpdateFailed, "Failed to update course", e)),
    }
}
