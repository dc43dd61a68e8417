use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::ItemKind;
use crate::models::FieldError;
use crate::utils::validate::validate_title;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(https?|ftps?)://[^\s/?#]+\.[^\s/?#]+(:\d+)?([/?#]\S*)?$")
        .expect("Invalid url regex")
});

/// 条目编辑表单
///
/// 只读取与种类相关的字段：text 用 `content`，video 用 `url`，
/// file / image 用 `file`（上传接口返回的 token）。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct ItemForm {
    #[serde(default)]
    pub title: String,
    pub content: Option<String>,
    pub url: Option<String>,
    pub file: Option<String>,
}

/// 校验后的条目载荷
#[derive(Debug, Clone, PartialEq)]
pub enum ItemPayload {
    Text { content: String },
    File { token: String },
    Image { token: String },
    Video { url: String },
}

impl ItemPayload {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemPayload::Text { .. } => ItemKind::Text,
            ItemPayload::File { .. } => ItemKind::File,
            ItemPayload::Image { .. } => ItemKind::Image,
            ItemPayload::Video { .. } => ItemKind::Video,
        }
    }

    /// 引用的上传 token（仅 file / image）
    pub fn upload_token(&self) -> Option<&str> {
        match self {
            ItemPayload::File { token } | ItemPayload::Image { token } => Some(token),
            _ => None,
        }
    }
}

/// 存储层使用的条目输入
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInput {
    pub title: String,
    pub payload: ItemPayload,
}

fn required(value: Option<String>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.push(FieldError::new(field, "This field is required"));
            None
        }
    }
}

impl ItemForm {
    pub fn validate(self, kind: ItemKind) -> Result<ItemInput, Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Err(msg) = validate_title(&self.title, 250) {
            errors.push(FieldError::new("title", msg));
        }

        let payload = match kind {
            ItemKind::Text => {
                required(self.content, "content", &mut errors).map(|content| ItemPayload::Text { content })
            }
            ItemKind::File => {
                required(self.file, "file", &mut errors).map(|token| ItemPayload::File { token })
            }
            ItemKind::Image => {
                required(self.file, "file", &mut errors).map(|token| ItemPayload::Image { token })
            }
            ItemKind::Video => match required(self.url, "url", &mut errors) {
                Some(url) if URL_RE.is_match(&url) && url.len() <= 200 => {
                    Some(ItemPayload::Video { url })
                }
                Some(_) => {
                    errors.push(FieldError::new("url", "Enter a valid URL"));
                    None
                }
                None => None,
            },
        };

        match payload {
            Some(payload) if errors.is_empty() => Ok(ItemInput {
                title: self.title.trim().to_string(),
                payload,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str) -> ItemForm {
        ItemForm {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_text_requires_content() {
        let errors = form("Notes").validate(ItemKind::Text).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("content", "This field is required")]);

        let input = ItemForm {
            content: Some("hello".to_string()),
            ..form("Notes")
        }
        .validate(ItemKind::Text)
        .unwrap();
        assert_eq!(input.payload, ItemPayload::Text { content: "hello".to_string() });
    }

    #[test]
    fn test_video_url_must_be_valid() {
        let bad = ItemForm {
            url: Some("not a url".to_string()),
            ..form("Clip")
        };
        assert_eq!(bad.validate(ItemKind::Video).unwrap_err()[0].field, "url");

        let good = ItemForm {
            url: Some("https://www.youtube.com/watch?v=abc".to_string()),
            ..form("Clip")
        };
        assert_eq!(good.validate(ItemKind::Video).unwrap().payload.kind(), ItemKind::Video);
    }

    #[test]
    fn test_irrelevant_fields_ignored() {
        let input = ItemForm {
            file: Some("token-1".to_string()),
            content: Some("ignored".to_string()),
            ..form("Slides")
        }
        .validate(ItemKind::Image)
        .unwrap();
        assert_eq!(input.payload.upload_token(), Some("token-1"));
    }

    #[test]
    fn test_title_and_payload_errors_reported_together() {
        let errors = form("").validate(ItemKind::File).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "file"]);
    }
}
