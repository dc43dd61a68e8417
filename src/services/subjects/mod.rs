use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::subjects::{requests::CreateSubjectRequest, responses::SubjectListResponse};
use crate::models::{ApiResponse, ErrorCode, FieldError};
use crate::services::{server_error, storage_from, validation_failed};

pub struct SubjectService;

impl SubjectService {
    pub fn new_lazy() -> Self {
        Self
    }

    /// 按标题排序的学科，附带课程数
    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = match storage_from(request) {
            Ok(storage) => storage,
            Err(response) => return Ok(response),
        };

        match storage.list_subjects_with_course_count().await {
            Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubjectListResponse { items },
                "Subjects retrieved successfully",
            ))),
            Err(e) => Ok(server_error(
                ErrorCode::InternalServerError,
                "Failed to list subjects",
                e,
            )),
        }
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        mut subject: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = match storage_from(request) {
            Ok(storage) => storage,
            Err(response) => return Ok(response),
        };

        subject.title = subject.title.trim().to_string();
        subject.slug = subject.slug.trim().to_string();
        if let Err(errors) = subject.validate() {
            return Ok(validation_failed(errors));
        }

        match storage.get_subject_by_slug(&subject.slug).await {
            Ok(Some(_)) => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error(
                    ErrorCode::SubjectAlreadyExists,
                    vec![FieldError::new("slug", "Subject with this slug already exists")],
                    "Subject already exists",
                )));
            }
            Ok(None) => {}
            Err(e) => {
                return Ok(server_error(
                    ErrorCode::InternalServerError,
                    "Failed to create subject",
                    e,
                ));
            }
        }

        match storage.create_subject(subject).await {
            Ok(subject) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully"))),
            Err(e) => Ok(server_error(
                ErrorCode::InternalServerError,
                "Failed to create subject",
                e,
            )),
        }
    }
}
