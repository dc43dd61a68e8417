pub mod auth;
pub mod contents;
pub mod courses;
pub mod modules;
pub mod subjects;
pub mod uploads;

pub use auth::AuthService;
pub use contents::ContentService;
pub use courses::CourseService;
pub use modules::ModuleService;
pub use subjects::SubjectService;
pub use uploads::UploadService;

use actix_web::{HttpRequest, HttpResponse, web};
use std::fmt::Display;
use std::sync::Arc;

use crate::models::{ApiResponse, ErrorCode, FieldError};
use crate::storage::Storage;

/// 从 app_data 取出存储；未注册时返回 500 响应
pub(crate) fn storage_from(request: &HttpRequest) -> Result<Arc<dyn Storage>, HttpResponse> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            tracing::error!("Storage not found in app data");
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Storage unavailable",
            ))
        })
}

pub(crate) fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized access, please login",
    ))
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn validation_failed(errors: Vec<FieldError>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::validation_failed(errors))
}

/// 记录错误并返回 500，错误详情不回传给客户端
pub(crate) fn server_error(code: ErrorCode, context: &str, err: impl Display) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(code, context))
}

/// 取出存储与当前用户，任一缺失时直接返回对应响应
macro_rules! storage_and_user {
    ($request:expr) => {{
        let storage = match $crate::services::storage_from($request) {
            Ok(storage) => storage,
            Err(response) => return Ok(response),
        };
        let user = match $crate::middlewares::RequireJWT::extract_user($request) {
            Some(user) => user,
            None => return Ok($crate::services::unauthorized()),
        };
        (storage, user)
    }};
}
pub(crate) use storage_and_user;
