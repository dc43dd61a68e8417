use serde::Serialize;
use ts_rs::TS;

use super::entities::Module;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "module.ts")]
pub struct ModuleListResponse {
    pub course_id: i64,
    pub items: Vec<Module>,
}
