use serde::Serialize;
use ts_rs::TS;

use super::entities::{ContentDetail, Item};
use crate::models::modules::entities::Module;

// 模块及其有序内容
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct ModuleContentsResponse {
    pub module: Module,
    pub items: Vec<ContentDetail>,
}

// 新建或更新条目的结果，新建时带上内容行ID
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct ItemSavedResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<i64>,
    pub item: Item,
}
