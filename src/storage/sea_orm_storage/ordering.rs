//! 作用域内的顺序号分配
//!
//! 新行未指定 order 时，取同一作用域（模块按课程、内容按模块）中
//! 最大的 order 加一；作用域为空时为 0。显式给出的 order 原样保留。
//!
//! 读取与插入之间没有锁，并发插入同一作用域可能得到相同的 order。

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Value,
};

use crate::entity::{contents, modules};
use crate::errors::{EducaError, Result};

/// 带作用域顺序号的实体
pub trait OrderedEntity: EntityTrait {
    /// 存放顺序号的列
    fn order_column() -> Self::Column;
    /// 决定兄弟行范围的列
    fn scope_columns() -> Vec<Self::Column>;
    fn order_of(model: &Self::Model) -> i32;
}

impl OrderedEntity for modules::Entity {
    fn order_column() -> Self::Column {
        modules::Column::Order
    }

    fn scope_columns() -> Vec<Self::Column> {
        vec![modules::Column::CourseId]
    }

    fn order_of(model: &Self::Model) -> i32 {
        model.order
    }
}

impl OrderedEntity for contents::Entity {
    fn order_column() -> Self::Column {
        contents::Column::Order
    }

    fn scope_columns() -> Vec<Self::Column> {
        vec![contents::Column::ModuleId]
    }

    fn order_of(model: &Self::Model) -> i32 {
        model.order
    }
}

/// 根据最后一个兄弟行的 order 计算下一个
pub fn next_from_last(last: Option<i32>) -> i32 {
    last.map_or(0, |order| order.saturating_add(1))
}

/// 计算新行的 order
///
/// `scope` 与 [`OrderedEntity::scope_columns`] 一一对应，应在执行插入的同一连接或事务上调用。
pub async fn assign_order<E, C>(conn: &C, explicit: Option<i32>, scope: Vec<Value>) -> Result<i32>
where
    E: OrderedEntity,
    C: ConnectionTrait,
{
    if let Some(order) = explicit {
        return Ok(order);
    }

    let columns = E::scope_columns();
    if columns.len() != scope.len() {
        return Err(EducaError::database_operation(format!(
            "order scope expects {} values, got {}",
            columns.len(),
            scope.len()
        )));
    }

    let condition = columns
        .into_iter()
        .zip(scope)
        .fold(Condition::all(), |cond, (column, value)| {
            cond.add(column.eq(value))
        });

    let last = E::find()
        .filter(condition)
        .order_by_desc(E::order_column())
        .one(conn)
        .await
        .map_err(|e| EducaError::database_operation(format!("查询顺序号失败: {e}")))?;

    Ok(next_from_last(last.as_ref().map(E::order_of)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_from_last() {
        assert_eq!(next_from_last(None), 0);
        assert_eq!(next_from_last(Some(0)), 1);
        assert_eq!(next_from_last(Some(41)), 42);
        assert_eq!(next_from_last(Some(i32::MAX)), i32::MAX);
    }
}
