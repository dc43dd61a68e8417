use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::path::Path;

use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::services::{not_found, server_error, storage_and_user};

/// 只能下载自己上传的文件，其他情况一律 404
pub async fn handle_download(request: &HttpRequest, token: String) -> ActixResult<HttpResponse> {
    let (storage, user) = storage_and_user!(request);

    let upload = match storage.get_upload_for_owner(&token, user.id).await {
        Ok(Some(upload)) => upload,
        Ok(None) => return Ok(not_found(ErrorCode::FileNotFound, "File not found")),
        Err(e) => return Ok(server_error(ErrorCode::InternalServerError, "File query failed", e)),
    };

    let file_path = Path::new(&AppConfig::get().upload.dir).join(&upload.stored_name);
    let buf = match std::fs::read(&file_path) {
        Ok(buf) => buf,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Upload {} has no file on disk", upload.token);
            return Ok(not_found(ErrorCode::FileNotFound, "File not found"));
        }
        Err(e) => return Ok(server_error(ErrorCode::InternalServerError, "File read failed", e)),
    };

    let file_name = upload.original_name.replace(['"', '\\', '\r', '\n'], "_");
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, upload.file_type))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(buf))
}
