use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::EducaError;
use crate::models::uploads::{entities::Upload, responses::UploadResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{server_error, storage_and_user};
use crate::utils::validate_magic_bytes;

fn rejected(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// 接收单个 `file` 字段并落盘，返回可被 file / image 条目引用的 token
pub async fn handle_upload(req: &HttpRequest, mut payload: Multipart) -> ActixResult<HttpResponse> {
    let (storage, user) = storage_and_user!(req);

    let config = &AppConfig::get().upload;
    let upload_dir = Path::new(&config.dir);

    if !upload_dir.exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        return Ok(server_error(
            ErrorCode::FileUploadFailed,
            "Failed to prepare upload directory",
            EducaError::from(e),
        ));
    }

    let token = Uuid::new_v4().to_string();
    let stored_name = format!("{token}.bin");
    let file_path = upload_dir.join(&stored_name);

    let mut original_name = String::new();
    let mut file_type = String::new();
    let mut file_size: i64 = 0;
    let mut file_uploaded = false;

    while let Some(mut field) = payload.try_next().await? {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }
        if file_uploaded {
            let _ = fs::remove_file(&file_path);
            return Ok(rejected(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            ));
        }
        file_uploaded = true;

        original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let extension = Path::new(&original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();

        if !config.is_allowed_extension(&extension) {
            return Ok(rejected(ErrorCode::FileTypeNotAllowed, "File type not allowed"));
        }

        // 仅用于记录，校验以扩展名与魔术字节为准
        file_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let mut f = match File::create(&file_path) {
            Ok(file) => file,
            Err(e) => {
                return Ok(server_error(ErrorCode::FileUploadFailed, "Failed to create file", e));
            }
        };

        let mut total_size: usize = 0;
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = chunk?;

            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    let _ = fs::remove_file(&file_path);
                    return Ok(rejected(
                        ErrorCode::FileTypeNotAllowed,
                        "File content does not match its extension",
                    ));
                }
            }

            total_size += data.len();
            if total_size > config.max_size {
                let _ = fs::remove_file(&file_path);
                return Ok(rejected(ErrorCode::FileSizeExceeded, "File size exceeds the limit"));
            }
            f.write_all(&data)?;
        }

        // 空文件不会进入上面的循环
        if first_chunk {
            let _ = fs::remove_file(&file_path);
            return Ok(rejected(ErrorCode::FileUploadFailed, "Uploaded file is empty"));
        }
        file_size = total_size as i64;
    }

    if !file_uploaded {
        return Ok(rejected(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        ));
    }

    let upload = Upload {
        token,
        original_name,
        stored_name,
        file_size,
        file_type,
        owner_id: user.id,
        uploaded_at: chrono::Utc::now(),
    };

    match storage.create_upload(upload).await {
        Ok(upload) => {
            tracing::info!(
                "User {} uploaded {} ({} bytes)",
                user.id,
                upload.original_name,
                upload.file_size
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UploadResponse {
                    token: upload.token,
                    file_name: upload.original_name,
                    size: upload.file_size,
                    content_type: upload.file_type,
                    uploaded_at: upload.uploaded_at,
                },
                "File uploaded successfully",
            )))
        }
        Err(e) => {
            let _ = fs::remove_file(&file_path);
            Ok(server_error(ErrorCode::FileUploadFailed, "Failed to save upload", e))
        }
    }
}
