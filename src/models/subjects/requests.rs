use serde::Deserialize;
use ts_rs::TS;

use crate::models::FieldError;
use crate::utils::validate::{validate_slug, validate_title};

// 创建学科请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct CreateSubjectRequest {
    pub title: String,
    pub slug: String,
}

impl CreateSubjectRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Err(msg) = validate_title(&self.title, 200) {
            errors.push(FieldError::new("title", msg));
        }
        if let Err(msg) = validate_slug(&self.slug) {
            errors.push(FieldError::new("slug", msg));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
