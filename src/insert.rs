//! InsertBuilder：多行 INSERT / MySQL upsert 语句构建。

use crate::condition::compile_term;
use crate::dialect::Dialect;
use crate::flavor::{Flavor, default_flavor};
use crate::string_builder::StringBuilder;
use crate::term::{BuildError, Term};
use crate::value::SqlValue;

const DEFAULT_PREFIX: &str = "INSERT INTO";

/// 多行 INSERT 构建器。
///
/// 行可以用 `row`（列名 → 值，首行固定列顺序）或 `cols` + `values`
/// （平行的列表）两种方式提供；单元格复用条件项的值表达式文法，但始终
/// 是裸的值槽（`Null` 绑定为 SQL NULL，不渲染 `IS NULL`）。
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    dialect: Box<dyn Dialect>,
    prefix: String,
    table: Option<String>,
    cols: Vec<String>,
    rows: Vec<Vec<Term>>,
    update: Vec<(String, Term)>,
}

impl Default for InsertBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InsertBuilder {
    /// 使用全局默认 Flavor 创建。
    pub fn new() -> Self {
        Self::with_flavor(default_flavor())
    }

    pub fn with_flavor(flavor: Flavor) -> Self {
        Self::with_dialect(Box::new(flavor))
    }

    pub fn with_dialect(dialect: Box<dyn Dialect>) -> Self {
        Self {
            dialect,
            prefix: DEFAULT_PREFIX.to_string(),
            table: None,
            cols: Vec::new(),
            rows: Vec::new(),
            update: Vec::new(),
        }
    }

    pub fn insert_into(&mut self, table: &str) -> &mut Self {
        self.table = Some(table.to_string());
        self
    }

    /// 替换语句的起始短语（默认 `INSERT INTO`，如 `INSERT IGNORE INTO`）。
    pub fn prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.prefix = prefix.into();
        self
    }

    /// 显式设置列顺序（与 `values` 平行使用）。
    pub fn cols(&mut self, cols: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.cols = cols.into_iter().map(Into::into).collect();
        self
    }

    /// 追加一行单元格；行宽必须与列数一致，在 `build` 时校验。
    pub fn values(&mut self, row: impl IntoIterator<Item = impl Into<Term>>) -> &mut Self {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// 以“列名 → 值”的形式追加一行。
    ///
    /// 首行的列顺序即语句的列顺序；后续每行必须给出完全相同的列集合，
    /// 多列、缺列都立即报错，不做静默补 NULL。
    pub fn row<K, T>(
        &mut self,
        pairs: impl IntoIterator<Item = (K, T)>,
    ) -> Result<&mut Self, BuildError>
    where
        K: Into<String>,
        T: Into<Term>,
    {
        let pairs: Vec<(String, Term)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        if self.cols.is_empty() {
            self.cols = pairs.iter().map(|(k, _)| k.clone()).collect();
            self.rows.push(pairs.into_iter().map(|(_, v)| v).collect());
            return Ok(self);
        }

        let row = self.rows.len();
        for (k, _) in &pairs {
            if !self.cols.iter().any(|c| c == k) {
                return Err(BuildError::UnknownRowColumn {
                    row,
                    column: k.clone(),
                });
            }
        }
        let mut cells = Vec::with_capacity(self.cols.len());
        for col in &self.cols {
            let Some(pos) = pairs.iter().position(|(k, _)| k == col) else {
                return Err(BuildError::MissingRowColumn {
                    row,
                    column: col.clone(),
                });
            };
            cells.push(pairs[pos].1.clone());
        }
        self.rows.push(cells);
        Ok(self)
    }

    /// 追加 `ON DUPLICATE KEY UPDATE` 的赋值对；仅 MySQL 系方言接受。
    pub fn on_duplicate_key_update<K, T>(
        &mut self,
        pairs: impl IntoIterator<Item = (K, T)>,
    ) -> &mut Self
    where
        K: Into<String>,
        T: Into<Term>,
    {
        self.update
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// 渲染完整语句；要么完整成功，要么不产出任何输出。
    pub fn build(&self) -> Result<(String, Vec<SqlValue>), BuildError> {
        let Some(table) = &self.table else {
            return Err(BuildError::MissingTable);
        };
        if self.rows.is_empty() {
            return Err(BuildError::EmptyRows);
        }
        if self.cols.is_empty() {
            return Err(BuildError::MissingCols);
        }

        let dialect = self.dialect.as_ref();
        let nl = dialect.line_separator();
        let mut buf = StringBuilder::new();
        let mut binds = Vec::new();

        buf.write_str(&self.prefix);
        buf.write_char(' ');
        buf.write_str(&dialect.quote(table));
        buf.write_str(nl);
        buf.write_char('(');
        buf.write_joined(self.cols.iter().map(|c| dialect.quote(c)), ", ");
        buf.write_char(')');
        buf.write_str(nl);
        buf.write_str("VALUES ");

        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.cols.len() {
                return Err(BuildError::RowArity {
                    row: i,
                    got: row.len(),
                    expected: self.cols.len(),
                });
            }
            if i > 0 {
                buf.write_str(", ");
            }
            buf.write_char('(');
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    buf.write_str(", ");
                }
                let (frag, sub) = compile_term(dialect, None, cell)?;
                buf.write_str(&frag);
                binds.extend(sub);
            }
            buf.write_char(')');
        }

        if !self.update.is_empty() {
            if !dialect.supports_on_duplicate_key() {
                return Err(BuildError::UpsertUnsupported(format!("{:?}", self.dialect)));
            }
            buf.write_str(nl);
            buf.write_str("ON DUPLICATE KEY UPDATE ");
            for (i, (col, cell)) in self.update.iter().enumerate() {
                if i > 0 {
                    buf.write_str(", ");
                }
                buf.write_str(&dialect.quote(col));
                buf.write_str(" = ");
                let (frag, sub) = compile_term(dialect, None, cell)?;
                buf.write_str(&frag);
                binds.extend(sub);
            }
        }

        let mut sql = buf.into_string();
        if !nl.is_empty() {
            while sql.ends_with(nl) {
                sql.truncate(sql.len() - nl.len());
            }
        }
        tracing::trace!(target: "sqlterm", sql = %sql, binds = binds.len(), "built insert statement");
        Ok((sql, binds))
    }
}
