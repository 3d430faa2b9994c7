//! 渲染产物：SQL 文本与执行器绑定所需的数据，渲染完成后不可变。

use crate::fragment::{FragmentAndParameters, ParameterMap};

/// 通用语句：SQL + 命名参数表。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementProvider {
    sql: String,
    parameters: ParameterMap,
}

impl StatementProvider {
    pub fn new(sql: impl Into<String>, parameters: ParameterMap) -> Self {
        Self {
            sql: sql.into(),
            parameters,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    pub fn into_parts(self) -> (String, ParameterMap) {
        (self.sql, self.parameters)
    }
}

impl From<FragmentAndParameters> for StatementProvider {
    fn from(f: FragmentAndParameters) -> Self {
        let (sql, parameters) = f.into_parts();
        Self { sql, parameters }
    }
}

/// 单行记录插入：占位符引用 `row` 的属性；显式值映射绑定在 `parameters` 中。
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatementProvider<T> {
    sql: String,
    parameters: ParameterMap,
    row: T,
}

impl<T> InsertStatementProvider<T> {
    pub fn new(sql: impl Into<String>, parameters: ParameterMap, row: T) -> Self {
        Self {
            sql: sql.into(),
            parameters,
            row,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    pub fn row(&self) -> &T {
        &self.row
    }

    pub fn into_row(self) -> T {
        self.row
    }
}

/// 多行插入：占位符引用 `records[i]` 的属性。
#[derive(Debug, Clone, PartialEq)]
pub struct MultiRowInsertStatementProvider<T> {
    sql: String,
    records: Vec<T>,
}

impl<T> MultiRowInsertStatementProvider<T> {
    pub fn new(sql: impl Into<String>, records: Vec<T>) -> Self {
        Self {
            sql: sql.into(),
            records,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }
}

/// 批量插入：一条单行插入语句，配合记录列表逐条执行。
#[derive(Debug, Clone, PartialEq)]
pub struct BatchInsert<T> {
    sql: String,
    records: Vec<T>,
}

impl<T> BatchInsert<T> {
    pub fn new(sql: impl Into<String>, records: Vec<T>) -> Self {
        Self {
            sql: sql.into(),
            records,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// 每条记录一个单行插入 provider，共享同一段 SQL。
    pub fn insert_statements(&self) -> impl Iterator<Item = InsertStatementProvider<&T>> + '_ {
        self.records
            .iter()
            .map(|r| InsertStatementProvider::new(self.sql.clone(), ParameterMap::new(), r))
    }
}

/// 顶层渲染完成后统一输出的调试日志。
pub(crate) fn log_rendered(
    statement: &'static str,
    strategy: &'static str,
    parameters: usize,
    sql: &str,
) {
    tracing::debug!(statement, strategy, parameters, sql, "rendered statement");
}
