use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct Course {
    // 课程ID
    pub id: i64,
    // 创建者（所有者）ID
    pub owner_id: i64,
    // 所属学科ID
    pub subject_id: i64,
    pub title: String,
    pub slug: String,
    pub overview: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
