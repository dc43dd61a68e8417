use serde::Deserialize;
use ts_rs::TS;

use crate::models::FieldError;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{validate_slug, validate_title};

// 课程查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 课程表单，创建与更新共用（更新为整表提交）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseForm {
    pub subject_id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub overview: String,
}

impl CourseForm {
    /// 字段级校验，subject 是否存在由服务层检查
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Err(msg) = validate_title(&self.title, 200) {
            errors.push(FieldError::new("title", msg));
        }
        if let Err(msg) = validate_slug(&self.slug) {
            errors.push(FieldError::new("slug", msg));
        }
        if self.overview.trim().is_empty() {
            errors.push(FieldError::new("overview", "This field is required"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

// 课程列表查询参数（用于存储层），owner_id 必填以限定所有者范围
#[derive(Debug, Clone)]
pub struct CourseListQuery {
    pub owner_id: i64,
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CourseForm {
        CourseForm {
            subject_id: 1,
            title: "Django by Example".to_string(),
            slug: "django-by-example".to_string(),
            overview: "Build real projects".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_collects_every_field_error() {
        let bad = CourseForm {
            title: " ".to_string(),
            slug: "not a slug".to_string(),
            overview: String::new(),
            ..form()
        };
        let errors = bad.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "slug", "overview"]);
    }

    #[test]
    fn test_title_too_long() {
        let bad = CourseForm {
            title: "x".repeat(201),
            ..form()
        };
        assert_eq!(bad.validate().unwrap_err()[0].field, "title");
    }
}
