use serde::Serialize;
use ts_rs::TS;

use super::entities::Subject;

// 学科及其课程数
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct SubjectSummary {
    #[serde(flatten)]
    #[ts(flatten)]
    pub subject: Subject,
    pub total_courses: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct SubjectListResponse {
    pub items: Vec<SubjectSummary>,
}
