use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::courses::requests::{CourseListQuery, CourseQueryParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{server_error, storage_and_user};

pub async fn list_courses(
    request: &HttpRequest,
    query: CourseQueryParams,
) -> ActixResult<HttpResponse> {
    let (storage, user) = storage_and_user!(request);

    let list_query = CourseListQuery {
        owner_id: user.id,
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search.filter(|s| !s.trim().is_empty()),
    };

    match storage.list_courses_for_owner(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Courses retrieved successfully",
        ))),
        Err(e) => Ok(server_error(
            ErrorCode::InternalServerError,
            "Failed to list courses",
            e,
        )),
    }
}
