use serde::Serialize;
use ts_rs::TS;

/// 上传成功后返回的 token，file / image 条目通过它引用文件
#[derive(Serialize, TS)]
#[ts(export, export_to = "upload.ts")]
pub struct UploadResponse {
    pub token: String,
    /// 原始文件名
    pub file_name: String,
    /// 文件大小(字节)
    pub size: i64,
    pub content_type: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
