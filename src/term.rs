//! Term：条件项与 INSERT 单元格共用的值表达式文法。

use crate::value::SqlValue;

/// 逻辑组合方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicMode {
    And,
    Or,
}

impl LogicMode {
    pub(crate) fn separator(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// 值表达式。封闭的递归枚举，编译时即可穷尽所有形状。
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// 普通标量；`SqlValue::Null` 在条件上下文渲染为 `IS NULL`。
    Value(SqlValue),
    /// 裸列表。首元素为结构化子表达式时按 OR 组合，否则是 `IN (?, ...)`。
    List(Vec<Term>),
    /// 显式逻辑组合：子项各自套括号，用 `AND`/`OR` 连接。
    Logic { mode: LogicMode, terms: Vec<Term> },
    /// 运算符 + 操作数（运算符原样透传，不做白名单校验）。
    Op(String, Operand),
    /// 原样拼入的 SQL 片段，无绑定参数（如 `IS NOT NULL`）。
    Sql(String),
    /// 原样拼入的 SQL 片段 + 自带的绑定参数（占位符已写在片段里）。
    SqlWith(String, Vec<SqlValue>),
}

/// `Term::Op` 的操作数形状。
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(SqlValue),
    List(Vec<SqlValue>),
    Sql(String),
    SqlWith(String, Vec<SqlValue>),
}

/// 构建失败的使用错误；一旦出现即中止构造，不产出残缺 SQL。
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BuildError {
    #[error("builder BETWEEN expects a 2-element list, got {0} element(s)")]
    BetweenArity(usize),
    #[error("builder operator {0} expects a list or raw SQL operand")]
    ExpectedListOperand(String),
    #[error("builder operator {0} does not accept a list operand")]
    UnexpectedListOperand(String),
    #[error("builder IN list elements must be scalar values")]
    NonScalarListElement,
    #[error("builder logical group needs at least one term")]
    EmptyLogicalGroup,
    #[error("builder term nesting is too deep")]
    TermTooDeep,
    #[error("builder term cannot be used as a bare value cell")]
    InvalidCellTerm,
    #[error("builder insert requires a target table")]
    MissingTable,
    #[error("builder insert requires at least one row")]
    EmptyRows,
    #[error("builder insert requires columns before values")]
    MissingCols,
    #[error("builder row {row} has {got} value(s), expected {expected}")]
    RowArity {
        row: usize,
        got: usize,
        expected: usize,
    },
    #[error("builder row {row} is missing column {column}")]
    MissingRowColumn { row: usize, column: String },
    #[error("builder row {row} has unknown column {column}")]
    UnknownRowColumn { row: usize, column: String },
    #[error("builder {0} does not support ON DUPLICATE KEY UPDATE")]
    UpsertUnsupported(String),
}

/// 原样 SQL 片段（LiteralEscape）。
pub fn sql(raw: impl Into<String>) -> Term {
    Term::Sql(raw.into())
}

/// 原样 SQL 片段 + 绑定参数（LiteralWithBinds）。
pub fn sql_with(
    raw: impl Into<String>,
    binds: impl IntoIterator<Item = impl Into<SqlValue>>,
) -> Term {
    Term::SqlWith(raw.into(), binds.into_iter().map(Into::into).collect())
}

/// 裸列表；元素全为标量时渲染为 `IN (?, ...)`。
pub fn list(items: impl IntoIterator<Item = impl Into<Term>>) -> Term {
    Term::List(items.into_iter().map(Into::into).collect())
}

/// 显式 OR 组合。
pub fn any(terms: impl IntoIterator<Item = impl Into<Term>>) -> Term {
    Term::Logic {
        mode: LogicMode::Or,
        terms: terms.into_iter().map(Into::into).collect(),
    }
}

/// 显式 AND 组合。
pub fn all(terms: impl IntoIterator<Item = impl Into<Term>>) -> Term {
    Term::Logic {
        mode: LogicMode::And,
        terms: terms.into_iter().map(Into::into).collect(),
    }
}

/// `col OP ?`，单个标量操作数。
pub fn op(operator: impl Into<String>, value: impl Into<SqlValue>) -> Term {
    Term::Op(operator.into(), Operand::Value(value.into()))
}

/// `col OP (?, ...)`，列表操作数（IN/NOT IN/BETWEEN 等）。
pub fn op_list(
    operator: impl Into<String>,
    values: impl IntoIterator<Item = impl Into<SqlValue>>,
) -> Term {
    Term::Op(
        operator.into(),
        Operand::List(values.into_iter().map(Into::into).collect()),
    )
}

/// `col OP <raw>`，原样操作数。
pub fn op_sql(operator: impl Into<String>, raw: impl Into<String>) -> Term {
    Term::Op(operator.into(), Operand::Sql(raw.into()))
}

/// `col OP <raw>` + 绑定参数（IN + 子查询等场景）。
pub fn op_sql_with(
    operator: impl Into<String>,
    raw: impl Into<String>,
    binds: impl IntoIterator<Item = impl Into<SqlValue>>,
) -> Term {
    Term::Op(
        operator.into(),
        Operand::SqlWith(raw.into(), binds.into_iter().map(Into::into).collect()),
    )
}

pub fn in_list(values: impl IntoIterator<Item = impl Into<SqlValue>>) -> Term {
    op_list("IN", values)
}

pub fn not_in(values: impl IntoIterator<Item = impl Into<SqlValue>>) -> Term {
    op_list("NOT IN", values)
}

pub fn between(lower: impl Into<SqlValue>, upper: impl Into<SqlValue>) -> Term {
    Term::Op(
        "BETWEEN".to_string(),
        Operand::List(vec![lower.into(), upper.into()]),
    )
}

pub fn null() -> Term {
    Term::Value(SqlValue::Null)
}

impl From<SqlValue> for Term {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

impl From<i64> for Term {
    fn from(v: i64) -> Self {
        SqlValue::I64(v).into()
    }
}
impl From<i32> for Term {
    fn from(v: i32) -> Self {
        SqlValue::I64(v as i64).into()
    }
}
impl From<u64> for Term {
    fn from(v: u64) -> Self {
        SqlValue::U64(v).into()
    }
}
impl From<bool> for Term {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v).into()
    }
}
impl From<f64> for Term {
    fn from(v: f64) -> Self {
        SqlValue::F64(v).into()
    }
}
impl From<&'static str> for Term {
    fn from(v: &'static str) -> Self {
        SqlValue::from(v).into()
    }
}
impl From<String> for Term {
    fn from(v: String) -> Self {
        SqlValue::from(v).into()
    }
}
impl From<Vec<u8>> for Term {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Bytes(v).into()
    }
}
impl From<time::OffsetDateTime> for Term {
    fn from(v: time::OffsetDateTime) -> Self {
        SqlValue::from(v).into()
    }
}

impl<T> From<Option<T>> for Term
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        Self::Value(SqlValue::from_option(v))
    }
}
