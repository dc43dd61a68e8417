use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use super::FieldError;

/// 批量排序请求：`{"<id>": <order>, ...}`
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "reorder.ts")]
pub struct ReorderRequest(pub BTreeMap<String, i64>);

impl ReorderRequest {
    /// 解析为 (id, order) 列表
    ///
    /// id 必须是整数，order 必须落在 `0..=i32::MAX`，任何一项不合法则整体拒绝。
    pub fn into_pairs(self) -> Result<Vec<(i64, i32)>, Vec<FieldError>> {
        let mut pairs = Vec::with_capacity(self.0.len());
        let mut errors = Vec::new();

        for (key, order) in self.0 {
            let id = match key.trim().parse::<i64>() {
                Ok(id) => id,
                Err(_) => {
                    errors.push(FieldError::new(key, "Id must be an integer"));
                    continue;
                }
            };
            match i32::try_from(order) {
                Ok(order) if order >= 0 => pairs.push((id, order)),
                _ => errors.push(FieldError::new(
                    key,
                    "Order must be a non-negative 32-bit integer",
                )),
            }
        }

        if errors.is_empty() {
            Ok(pairs)
        } else {
            Err(errors)
        }
    }
}

/// 单个 id 的排序结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "reorder.ts")]
pub struct ReorderOutcome {
    pub id: i64,
    /// 为 false 表示该 id 不存在或不属于当前用户
    pub updated: bool,
}

/// 批量排序响应，`saved` 恒为 "OK"
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "reorder.ts")]
pub struct ReorderResponse {
    pub saved: String,
    pub results: Vec<ReorderOutcome>,
}

impl ReorderResponse {
    pub fn ok(results: Vec<ReorderOutcome>) -> Self {
        Self {
            saved: "OK".to_string(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> ReorderRequest {
        serde_json::from_str(json).expect("valid reorder json")
    }

    #[test]
    fn test_parse_pairs() {
        let mut pairs = request(r#"{"5": 2, "7": 0}"#).into_pairs().unwrap();
        pairs.sort();
        assert_eq!(pairs, vec![(5, 2), (7, 0)]);
    }

    #[test]
    fn test_reject_non_integer_id() {
        let errors = request(r#"{"abc": 1, "3": 1}"#).into_pairs().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "abc");
    }

    #[test]
    fn test_reject_negative_order() {
        let errors = request(r#"{"3": -1}"#).into_pairs().unwrap_err();
        assert_eq!(errors[0].field, "3");
    }

    #[test]
    fn test_reject_overflowing_order() {
        let errors = request(r#"{"3": 4294967296}"#).into_pairs().unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_ok_response_is_fixed_acknowledgment() {
        let resp = ReorderResponse::ok(vec![]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["saved"], "OK");
    }
}
