//! 路径参数提取器
//!
//! 非法的路径参数直接返回 400 信封，而不是 actix 默认的纯文本 404。

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};

use crate::models::contents::entities::ItemKind;
use crate::models::{ApiResponse, ErrorCode};

fn bad_path(message: String) -> actix_web::Error {
    bad_path_with_code(ErrorCode::BadRequest, message)
}

fn bad_path_with_code(code: ErrorCode, message: String) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(code, &message));
    InternalError::from_response(message, response).into()
}

/// 定义一个从路径段解析正整数 ID 的提取器
macro_rules! define_safe_id {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                let raw = req.match_info().get($param).unwrap_or_default();
                ready(match raw.parse::<i64>() {
                    Ok(id) if id > 0 => Ok($name(id)),
                    _ => Err(bad_path(format!("Invalid {}: '{}'", $param, raw))),
                })
            }
        }
    };
}

define_safe_id!(SafeCourseId, "course_id");
define_safe_id!(SafeModuleId, "module_id");
define_safe_id!(SafeContentId, "content_id");
define_safe_id!(SafeItemId, "item_id");

/// 上传文件 token（uuid v4 格式）
#[derive(Debug, Clone)]
pub struct SafeUploadToken(pub String);

impl FromRequest for SafeUploadToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("token").unwrap_or_default();
        ready(match uuid::Uuid::parse_str(raw) {
            Ok(token) => Ok(SafeUploadToken(token.to_string())),
            Err(_) => Err(bad_path(format!("Invalid file token: '{raw}'"))),
        })
    }
}

/// 内容种类 `model_name`，只接受 text / video / image / file
#[derive(Debug, Clone, Copy)]
pub struct SafeItemKind(pub ItemKind);

impl FromRequest for SafeItemKind {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("model_name").unwrap_or_default();
        ready(
            raw.parse::<ItemKind>()
                .map(SafeItemKind)
                .map_err(|msg| bad_path_with_code(ErrorCode::ContentTypeInvalid, msg)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_safe_id_accepts_positive_integers() {
        let req = TestRequest::default()
            .param("course_id", "42")
            .to_http_request();
        let id = SafeCourseId::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_safe_id_rejects_garbage() {
        for raw in ["abc", "0", "-3", ""] {
            let req = TestRequest::default()
                .param("module_id", raw)
                .to_http_request();
            assert!(SafeModuleId::extract(&req).await.is_err());
        }
    }

    #[actix_web::test]
    async fn test_item_kind_rejects_unknown_model_name() {
        let req = TestRequest::default()
            .param("model_name", "course")
            .to_http_request();
        assert!(SafeItemKind::extract(&req).await.is_err());

        let req = TestRequest::default()
            .param("model_name", "video")
            .to_http_request();
        assert_eq!(SafeItemKind::extract(&req).await.unwrap().0, ItemKind::Video);
    }
}
