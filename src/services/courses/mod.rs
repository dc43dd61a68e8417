pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::EducaError;
use crate::models::courses::requests::{CourseForm, CourseQueryParams};
use crate::models::{ApiResponse, ErrorCode, FieldError};
use crate::services::server_error;
use crate::storage::Storage;

pub struct CourseService;

impl CourseService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(request, query).await
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        form: CourseForm,
    ) -> ActixResult<HttpResponse> {
        create::create_course(request, form).await
    }

    pub async fn get_course(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        get::get_course(request, course_id).await
    }

    pub async fn update_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
        form: CourseForm,
    ) -> ActixResult<HttpResponse> {
        update::update_course(request, course_id, form).await
    }

    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(request, course_id).await
    }
}

fn slug_conflict() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error(
        ErrorCode::CourseAlreadyExists,
        vec![FieldError::new("slug", "Course with this slug already exists")],
        "Course already exists",
    ))
}

// 并发创建时可能绕过预检查，落到数据库唯一约束
fn is_unique_violation(err: &EducaError) -> bool {
    let msg = err.message().to_ascii_lowercase();
    msg.contains("unique") || msg.contains("duplicate")
}

/// 校验课程表单：字段格式、学科存在、slug 未被其他课程占用
///
/// 返回 Err 时为可直接回写的响应
async fn check_form(
    storage: &Arc<dyn Storage>,
    form: &mut CourseForm,
    exclude_id: Option<i64>,
    failure: ErrorCode,
) -> Result<(), HttpResponse> {
    form.title = form.title.trim().to_string();
    form.slug = form.slug.trim().to_string();

    let mut errors = form.validate().err().unwrap_or_default();

    match storage.get_subject_by_id(form.subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => errors.push(FieldError::new("subject_id", "Select a valid subject")),
        Err(e) => return Err(server_error(failure, "Failed to load subject", e)),
    }

    if !errors.is_empty() {
        return Err(HttpResponse::BadRequest().json(ApiResponse::validation_failed(errors)));
    }

    match storage.course_slug_taken(&form.slug, exclude_id).await {
        Ok(true) => Err(slug_conflict()),
        Ok(false) => Ok(()),
        Err(e) => Err(server_error(failure, "Failed to check slug", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_detection() {
        assert!(is_unique_violation(&EducaError::database_operation(
            "UNIQUE constraint failed: courses.slug"
        )));
        assert!(is_unique_violation(&EducaError::database_operation(
            "Duplicate entry 'x' for key 'slug'"
        )));
        assert!(!is_unique_violation(&EducaError::database_operation(
            "no such table"
        )));
    }
}
