use std::collections::HashSet;

use serde::Deserialize;
use ts_rs::TS;

use crate::models::FieldError;
use crate::utils::validate::validate_title;

/// 模块表单集中的一项
///
/// 没有 id 的为新增，带 id 的为修改，`delete` 为 true 时删除该模块。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "module.ts")]
pub struct ModuleFormEntry {
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub delete: bool,
}

impl ModuleFormEntry {
    /// 未填写任何内容的新增项，直接忽略
    pub fn is_blank_extra(&self) -> bool {
        self.id.is_none() && self.title.trim().is_empty() && self.description.trim().is_empty()
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "module.ts")]
pub struct ModuleFormsetRequest {
    pub modules: Vec<ModuleFormEntry>,
}

/// 校验通过后的表单集，交给存储层在一个事务中执行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleFormsetPlan {
    pub creates: Vec<(String, String)>,
    pub updates: Vec<(i64, String, String)>,
    pub deletes: Vec<i64>,
}

impl ModuleFormsetRequest {
    /// 校验并整理表单集
    ///
    /// `existing` 为课程当前的模块 id，引用其他 id 的项视为非法。
    /// 任何一项出错则整体拒绝。
    pub fn into_plan(self, existing: &HashSet<i64>) -> Result<ModuleFormsetPlan, Vec<FieldError>> {
        let mut plan = ModuleFormsetPlan::default();
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for (index, entry) in self.modules.into_iter().enumerate() {
            if entry.is_blank_extra() {
                continue;
            }

            if let Some(id) = entry.id {
                if !existing.contains(&id) {
                    errors.push(FieldError::new(
                        format!("modules[{index}].id"),
                        "Select a valid choice. That module is not part of this course",
                    ));
                    continue;
                }
                if !seen.insert(id) {
                    errors.push(FieldError::new(
                        format!("modules[{index}].id"),
                        "Module appears more than once",
                    ));
                    continue;
                }
            }

            if entry.delete {
                // 新增项勾选删除等同于不提交
                if let Some(id) = entry.id {
                    plan.deletes.push(id);
                }
                continue;
            }

            if let Err(msg) = validate_title(&entry.title, 200) {
                errors.push(FieldError::new(format!("modules[{index}].title"), msg));
                continue;
            }

            let title = entry.title.trim().to_string();
            match entry.id {
                Some(id) => plan.updates.push((id, title, entry.description)),
                None => plan.creates.push((title, entry.description)),
            }
        }

        if errors.is_empty() {
            Ok(plan)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: Option<i64>, title: &str, delete: bool) -> ModuleFormEntry {
        ModuleFormEntry {
            id,
            title: title.to_string(),
            description: String::new(),
            delete,
        }
    }

    #[test]
    fn test_plan_splits_create_update_delete() {
        let existing: HashSet<i64> = [1, 2].into_iter().collect();
        let request = ModuleFormsetRequest {
            modules: vec![
                entry(Some(1), "Introduction", false),
                entry(Some(2), "Old", true),
                entry(None, "Models", false),
                entry(None, "", false),
                entry(None, "", false),
            ],
        };
        let plan = request.into_plan(&existing).unwrap();
        assert_eq!(plan.updates, vec![(1, "Introduction".to_string(), String::new())]);
        assert_eq!(plan.deletes, vec![2]);
        assert_eq!(plan.creates, vec![("Models".to_string(), String::new())]);
    }

    #[test]
    fn test_foreign_module_id_rejected() {
        let existing: HashSet<i64> = [1].into_iter().collect();
        let request = ModuleFormsetRequest {
            modules: vec![entry(Some(99), "Hijack", false)],
        };
        let errors = request.into_plan(&existing).unwrap_err();
        assert_eq!(errors[0].field, "modules[0].id");
    }

    #[test]
    fn test_missing_title_rejects_whole_submission() {
        let existing: HashSet<i64> = [1].into_iter().collect();
        let request = ModuleFormsetRequest {
            modules: vec![
                entry(None, "Fine", false),
                ModuleFormEntry {
                    description: "only a description".to_string(),
                    ..Default::default()
                },
            ],
        };
        let errors = request.into_plan(&existing).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "modules[1].title");
    }

    #[test]
    fn test_deleted_entry_skips_title_check() {
        let existing: HashSet<i64> = [4].into_iter().collect();
        let request = ModuleFormsetRequest {
            modules: vec![entry(Some(4), "", true)],
        };
        assert_eq!(request.into_plan(&existing).unwrap().deletes, vec![4]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let existing: HashSet<i64> = [4].into_iter().collect();
        let request = ModuleFormsetRequest {
            modules: vec![entry(Some(4), "A", false), entry(Some(4), "B", false)],
        };
        let errors = request.into_plan(&existing).unwrap_err();
        assert_eq!(errors[0].field, "modules[1].id");
    }
}
