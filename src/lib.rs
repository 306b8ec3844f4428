//! sqlterm：可组合的 SQL 条件片段与多行 INSERT 构建库。
//!
//! 两个入口共用同一套值表达式文法（[`Term`]）：
//! [`ConditionBuilder`] 把 `(列, 值表达式)` 编译为带括号的条件片段并支持
//! AND/OR 组合；[`InsertBuilder`] 构建多行 INSERT 及 MySQL 的
//! `ON DUPLICATE KEY UPDATE`。所有产物都是 `(sql, binds)`：`?` 占位符的
//! 个数与顺序严格等于参数列表。

pub mod condition;
pub mod dialect;
pub mod flavor;
pub mod insert;
#[cfg(test)]
mod insert_tests;
mod string_builder;
pub mod term;
pub mod value;

pub use crate::condition::ConditionBuilder;
pub use crate::dialect::Dialect;
pub use crate::flavor::{
    DefaultFlavorGuard, Flavor, default_flavor, set_default_flavor, set_default_flavor_scoped,
};
pub use crate::insert::InsertBuilder;
pub use crate::term::{
    BuildError, LogicMode, Operand, Term, all, any, between, in_list, list, not_in, null, op,
    op_list, op_sql, op_sql_with, sql, sql_with,
};
pub use crate::value::SqlValue;
