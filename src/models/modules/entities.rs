use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "module.ts")]
pub struct Module {
    pub id: i64,
    // 所属课程ID
    pub course_id: i64,
    pub title: String,
    pub description: String,
    // 课程内排序，从 0 开始
    pub order: i32,
}
