//! 数据模型定义
//!
//! `entities` 为业务实体，`requests` 为请求体/查询参数，`responses` 为响应体。

pub mod auth;
pub mod common;
pub mod contents;
pub mod courses;
pub mod modules;
pub mod subjects;
pub mod uploads;
pub mod users;

pub use common::{
    ApiResponse, FieldError, PaginationInfo, PaginationQuery,
    ReorderOutcome, ReorderRequest, ReorderResponse,
};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码，随 [`ApiResponse`] 一起返回
///
/// - 0: 成功
/// - 1xxx: 通用错误
/// - 2xxx: 认证与用户
/// - 3xxx: 学科与课程
/// - 4xxx: 模块与内容
/// - 5xxx: 上传文件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserNotFound = 2002,
    UserNameInvalid = 2003,
    UserEmailInvalid = 2004,
    UserPasswordInvalid = 2005,
    UserNameAlreadyExists = 2006,
    UserEmailAlreadyExists = 2007,
    UserUpdateFailed = 2008,

    SubjectNotFound = 3000,
    SubjectAlreadyExists = 3001,
    CourseNotFound = 3100,
    CourseAlreadyExists = 3101,
    CourseCreationFailed = 3102,
    CourseUpdateFailed = 3103,
    CourseDeleteFailed = 3104,

    ModuleNotFound = 4000,
    ModuleUpdateFailed = 4001,
    ContentNotFound = 4100,
    ContentTypeInvalid = 4101,
    ContentSaveFailed = 4102,
    ContentDeleteFailed = 4103,
    ItemNotFound = 4104,
    ReorderFailed = 4200,

    FileNotFound = 5000,
    FileUploadFailed = 5001,
    FileTypeNotAllowed = 5002,
    FileSizeExceeded = 5003,
    MultifileUploadNotAllowed = 5004,
}
