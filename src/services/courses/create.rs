use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::courses::requests::CourseForm;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{server_error, storage_and_user};

use super::{check_form, is_unique_violation, slug_conflict};

pub async fn create_course(request: &HttpRequest, mut form: CourseForm) -> ActixResult<HttpResponse> {
    let (storage, user) = storage_and_user!(request);

    if let Err(response) = check_form(&storage, &mut form, None, ErrorCode::CourseCreationFailed).await {
        return Ok(response);
    }

    match storage.create_course(user.id, form).await {
        Ok(course) => {
            tracing::info!("User {} created course {}", user.id, course.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) if is_unique_violation(&e) => Ok(slug_conflict()),
        Err(e) => Ok(server_error(ErrorCode::CourseCreationFailed, "Failed to create course", e)),
    }
}
