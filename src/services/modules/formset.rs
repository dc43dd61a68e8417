use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use crate::models::modules::{requests::ModuleFormsetRequest, responses::ModuleListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, server_error, storage_and_user, validation_failed};

/// 一次提交课程的全部模块：新增、修改、标记删除
///
/// 任一条目校验失败则整体拒绝，不写入任何数据。
pub async fn save_formset(
    request: &HttpRequest,
    course_id: i64,
    formset: ModuleFormsetRequest,
) -> ActixResult<HttpResponse> {
    let (storage, user) = storage_and_user!(request);

    let existing: HashSet<i64> = match storage.list_modules_for_owner(course_id, user.id).await {
        Ok(Some(modules)) => modules.into_iter().map(|m| m.id).collect(),
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => return Ok(server_error(ErrorCode::ModuleUpdateFailed, "Failed to save modules", e)),
    };

    let plan = match formset.into_plan(&existing) {
        Ok(plan) => plan,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    tracing::debug!(
        "Module formset for course {}: {} new, {} changed, {} deleted",
        course_id,
        plan.creates.len(),
        plan.updates.len(),
        plan.deletes.len()
    );

    match storage.apply_module_formset(course_id, user.id, plan).await {
        Ok(Some(items)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ModuleListResponse { course_id, items },
            "Modules saved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(server_error(ErrorCode::ModuleUpdateFailed, "Failed to save modules", e)),
    }
}
