//! ConditionBuilder：条件项的累积编译与 AND/OR 组合。

use crate::dialect::Dialect;
use crate::flavor::{Flavor, default_flavor};
use crate::string_builder::{StringBuilder, placeholders};
use crate::term::{BuildError, LogicMode, Operand, Term};
use crate::value::SqlValue;

/// 递归编译的最大嵌套深度；超出按使用错误处理，避免构造恶意深树打爆栈。
pub(crate) const MAX_TERM_DEPTH: usize = 64;

/// WHERE 条件构建器。
///
/// `add` 原地追加并返回自身以便链式调用；`and`/`or` 不修改任何一侧，
/// 返回新的第三个实例。
#[derive(Debug, Clone)]
pub struct ConditionBuilder {
    dialect: Box<dyn Dialect>,
    fragments: Vec<String>,
    binds: Vec<SqlValue>,
}

impl Default for ConditionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionBuilder {
    /// 使用全局默认 Flavor 创建。
    pub fn new() -> Self {
        Self::with_flavor(default_flavor())
    }

    pub fn with_flavor(flavor: Flavor) -> Self {
        Self::with_dialect(Box::new(flavor))
    }

    /// 使用自定义 Dialect（自定义 quote 规则）创建。
    pub fn with_dialect(dialect: Box<dyn Dialect>) -> Self {
        Self {
            dialect,
            fragments: Vec::new(),
            binds: Vec::new(),
        }
    }

    /// 编译 `(column, term)`，把片段套一层括号后追加。
    ///
    /// 使用错误（如 BETWEEN 元素个数不为 2）直接返回 Err，本次调用不留下
    /// 任何半成品状态。
    pub fn add(&mut self, column: &str, term: impl Into<Term>) -> Result<&mut Self, BuildError> {
        let term = term.into();
        let (frag, binds) = compile_term(self.dialect.as_ref(), Some(column), &term)?;
        self.fragments.push(format!("({frag})"));
        self.binds.extend(binds);
        Ok(self)
    }

    /// AND 组合：`(self.render()) AND (other.render())`，参数顺序 self 在前。
    pub fn and(&self, other: &ConditionBuilder) -> ConditionBuilder {
        self.compose(other, LogicMode::And)
    }

    /// OR 组合：`(self.render()) OR (other.render())`，参数顺序 self 在前。
    pub fn or(&self, other: &ConditionBuilder) -> ConditionBuilder {
        self.compose(other, LogicMode::Or)
    }

    fn compose(&self, other: &ConditionBuilder, mode: LogicMode) -> ConditionBuilder {
        // 一侧为空时组合退化为另一侧的拷贝，避免渲染出 `()`。
        if self.fragments.is_empty() {
            return other.clone();
        }
        if other.fragments.is_empty() {
            return self.clone();
        }

        let keyword = match mode {
            LogicMode::And => "AND",
            LogicMode::Or => "OR",
        };
        let mut binds = self.binds.clone();
        binds.extend(other.binds.iter().cloned());
        ConditionBuilder {
            dialect: self.dialect.clone(),
            fragments: vec![format!("({}) {keyword} ({})", self.render(), other.render())],
            binds,
        }
    }

    /// 所有顶层片段用 ` AND ` 连接；零个片段渲染为空串，由调用方决定
    /// 是否省略整个 WHERE 子句。
    pub fn render(&self) -> String {
        let mut buf = StringBuilder::new();
        buf.write_joined(&self.fragments, " AND ");
        buf.into_string()
    }

    pub fn binds(&self) -> &[SqlValue] {
        &self.binds
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// 渲染并交出 `(sql, binds)`。
    pub fn build(&self) -> (String, Vec<SqlValue>) {
        let sql = self.render();
        tracing::trace!(target: "sqlterm", sql = %sql, binds = self.binds.len(), "built condition fragment");
        (sql, self.binds.clone())
    }
}

/// 把一个值表达式编译成 `(片段, 有序参数)`。
///
/// `column` 为 Some 时是条件上下文（片段形如 `col = ?`）；为 None 时是
/// INSERT 单元格上下文（片段是裸的值槽，只允许 Sql/SqlWith/Value）。
/// 参数顺序严格跟随片段中 `?` 从左到右的出现顺序。
pub(crate) fn compile_term(
    dialect: &dyn Dialect,
    column: Option<&str>,
    term: &Term,
) -> Result<(String, Vec<SqlValue>), BuildError> {
    compile_at(dialect, column, term, 0)
}

fn compile_at(
    dialect: &dyn Dialect,
    column: Option<&str>,
    term: &Term,
    depth: usize,
) -> Result<(String, Vec<SqlValue>), BuildError> {
    if depth > MAX_TERM_DEPTH {
        return Err(BuildError::TermTooDeep);
    }

    match (column, term) {
        (_, Term::Sql(raw)) => Ok((with_column(dialect, column, raw), Vec::new())),
        (_, Term::SqlWith(raw, binds)) => {
            Ok((with_column(dialect, column, raw), binds.clone()))
        }
        (Some(col), Term::Value(SqlValue::Null)) => {
            Ok((format!("{} IS NULL", dialect.quote(col)), Vec::new()))
        }
        (Some(col), Term::Value(v)) => {
            Ok((format!("{} = ?", dialect.quote(col)), vec![v.clone()]))
        }
        // 单元格是位置化的 VALUES 槽：Null 也走 `?`，由驱动绑定为 SQL NULL。
        (None, Term::Value(v)) => Ok(("?".to_string(), vec![v.clone()])),
        (Some(col), Term::List(items)) => compile_list(dialect, col, items, depth),
        (Some(col), Term::Logic { mode, terms }) => {
            compile_logic(dialect, col, *mode, terms, depth)
        }
        (Some(col), Term::Op(operator, operand)) => compile_op(dialect, col, operator, operand),
        (None, _) => Err(BuildError::InvalidCellTerm),
    }
}

fn with_column(dialect: &dyn Dialect, column: Option<&str>, raw: &str) -> String {
    match column {
        Some(col) => format!("{} {raw}", dialect.quote(col)),
        None => raw.to_string(),
    }
}

/// 裸列表：首元素是结构化子表达式时按 OR 组合，否则是普通 IN 列表。
fn compile_list(
    dialect: &dyn Dialect,
    col: &str,
    items: &[Term],
    depth: usize,
) -> Result<(String, Vec<SqlValue>), BuildError> {
    if let Some(first) = items.first()
        && !matches!(first, Term::Value(_))
    {
        return compile_logic(dialect, col, LogicMode::Or, items, depth);
    }

    // 空 IN 列表退化为恒假，保持 SQL 合法。
    if items.is_empty() {
        return Ok(("0=1".to_string(), Vec::new()));
    }

    let mut binds = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Term::Value(v) => binds.push(v.clone()),
            _ => return Err(BuildError::NonScalarListElement),
        }
    }
    Ok((
        format!("{} IN ({})", dialect.quote(col), placeholders(binds.len())),
        binds,
    ))
}

fn compile_logic(
    dialect: &dyn Dialect,
    col: &str,
    mode: LogicMode,
    terms: &[Term],
    depth: usize,
) -> Result<(String, Vec<SqlValue>), BuildError> {
    if terms.is_empty() {
        return Err(BuildError::EmptyLogicalGroup);
    }

    let mut buf = StringBuilder::new();
    let mut binds = Vec::new();
    for (i, t) in terms.iter().enumerate() {
        if i > 0 {
            buf.write_str(mode.separator());
        }
        let (frag, sub) = compile_at(dialect, Some(col), t, depth + 1)?;
        buf.write_char('(');
        buf.write_str(&frag);
        buf.write_char(')');
        // 子项的参数就地拼接，保证与占位符出现顺序一致
        binds.extend(sub);
    }
    Ok((buf.into_string(), binds))
}

fn compile_op(
    dialect: &dyn Dialect,
    col: &str,
    operator: &str,
    operand: &Operand,
) -> Result<(String, Vec<SqlValue>), BuildError> {
    let op = operator.trim().to_ascii_uppercase();
    let quoted = dialect.quote(col);

    match op.as_str() {
        "IN" | "NOT IN" => match operand {
            Operand::List(values) => {
                if values.is_empty() {
                    // 空 IN 恒假、空 NOT IN 恒真，都是合法 SQL 而非报错
                    let lit = if op == "IN" { "0=1" } else { "1=1" };
                    return Ok((lit.to_string(), Vec::new()));
                }
                Ok((
                    format!("{quoted} {op} ({})", placeholders(values.len())),
                    values.clone(),
                ))
            }
            Operand::Sql(raw) => Ok((format!("{quoted} {op} ({raw})"), Vec::new())),
            Operand::SqlWith(raw, binds) => {
                Ok((format!("{quoted} {op} ({raw})"), binds.clone()))
            }
            Operand::Value(_) => Err(BuildError::ExpectedListOperand(op)),
        },
        "BETWEEN" | "NOT BETWEEN" => match operand {
            Operand::List(values) if values.len() == 2 => {
                Ok((format!("{quoted} {op} ? AND ?"), values.clone()))
            }
            Operand::List(values) => Err(BuildError::BetweenArity(values.len())),
            _ => Err(BuildError::ExpectedListOperand(op)),
        },
        _ => match operand {
            Operand::Sql(raw) => Ok((format!("{quoted} {op} {raw}"), Vec::new())),
            Operand::SqlWith(raw, binds) => {
                Ok((format!("{quoted} {op} {raw}"), binds.clone()))
            }
            Operand::Value(v) => Ok((format!("{quoted} {op} ?"), vec![v.clone()])),
            Operand::List(_) => Err(BuildError::UnexpectedListOperand(op)),
        },
    }
}
