//! 渲染策略：决定占位符的文本形式（`?`、`:p1`、`#{parameters.p1,jdbcType=INTEGER}`）。
//!
//! 策略是无状态的值对象，由调用方构造后传给 `render`；不存在全局默认策略。

use crate::table::SqlColumn;
use std::borrow::Cow;
use std::fmt;

/// 分页子句的两种互斥写法。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PagingStyle {
    /// `limit ? offset ?`
    LimitOffset,
    /// `offset ? rows fetch first ? rows only`
    FetchFirst,
}

impl fmt::Display for PagingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitOffset => f.write_str("limit/offset"),
            Self::FetchFirst => f.write_str("fetch first"),
        }
    }
}

/// 策略所支持的分页写法。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagingSupport {
    #[default]
    All,
    LimitOffsetOnly,
    FetchFirstOnly,
}

impl PagingSupport {
    pub fn allows(self, style: PagingStyle) -> bool {
        match self {
            Self::All => true,
            Self::LimitOffsetOnly => style == PagingStyle::LimitOffset,
            Self::FetchFirstOnly => style == PagingStyle::FetchFirst,
        }
    }
}

pub trait RenderingStrategy: fmt::Debug + Send + Sync {
    /// 用于日志与错误信息的策略名称。
    fn name(&self) -> &'static str;

    /// 为一个参数生成占位符；`column` 为空表示参数不对应列（例如分页）。
    fn format_parameter(&self, column: Option<&SqlColumn>, prefix: &str, parameter: &str)
    -> String;

    /// 参数访问路径的前缀（如 MyBatis 的 `parameters`）。
    fn parameter_prefix(&self) -> &str {
        "parameters"
    }

    /// 单条记录插入时绑定记录属性的占位符。
    fn format_record_binding(&self, column: &SqlColumn, property: &str) -> String {
        self.format_parameter(Some(column), "row", property)
    }

    /// 多行插入时绑定第 N 条记录属性的占位符，`prefix` 形如 `records[0]`。
    fn format_indexed_record_binding(
        &self,
        column: &SqlColumn,
        prefix: &str,
        property: &str,
    ) -> String {
        self.format_parameter(Some(column), prefix, property)
    }

    fn supports_paging(&self, _style: PagingStyle) -> bool {
        true
    }
}

/// MyBatis3：`#{parameters.p1,jdbcType=INTEGER,typeHandler=...}`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MyBatis3Strategy {
    prefix: Cow<'static, str>,
    paging: PagingSupport,
}

impl Default for MyBatis3Strategy {
    fn default() -> Self {
        Self {
            prefix: Cow::Borrowed("parameters"),
            paging: PagingSupport::All,
        }
    }
}

impl MyBatis3Strategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_paging_support(mut self, paging: PagingSupport) -> Self {
        self.paging = paging;
        self
    }
}

impl RenderingStrategy for MyBatis3Strategy {
    fn name(&self) -> &'static str {
        "MyBatis3"
    }

    fn format_parameter(
        &self,
        column: Option<&SqlColumn>,
        prefix: &str,
        parameter: &str,
    ) -> String {
        let mut s = String::from("#{");
        if !prefix.is_empty() {
            s.push_str(prefix);
            s.push('.');
        }
        s.push_str(parameter);
        if let Some(col) = column {
            if let Some(t) = col.sql_type() {
                s.push_str(",jdbcType=");
                s.push_str(t.as_str());
            }
            if let Some(h) = col.type_handler() {
                s.push_str(",typeHandler=");
                s.push_str(h);
            }
        }
        s.push('}');
        s
    }

    fn parameter_prefix(&self) -> &str {
        &self.prefix
    }

    fn supports_paging(&self, style: PagingStyle) -> bool {
        self.paging.allows(style)
    }
}

/// Spring `NamedParameterJdbcTemplate`：`:p1`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpringNamedParameterStrategy {
    paging: PagingSupport,
}

impl SpringNamedParameterStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paging_support(mut self, paging: PagingSupport) -> Self {
        self.paging = paging;
        self
    }
}

impl RenderingStrategy for SpringNamedParameterStrategy {
    fn name(&self) -> &'static str {
        "SpringNamedParameter"
    }

    fn format_parameter(
        &self,
        _column: Option<&SqlColumn>,
        _prefix: &str,
        parameter: &str,
    ) -> String {
        format!(":{parameter}")
    }

    fn format_record_binding(&self, _column: &SqlColumn, property: &str) -> String {
        format!(":{property}")
    }

    fn format_indexed_record_binding(
        &self,
        _column: &SqlColumn,
        prefix: &str,
        property: &str,
    ) -> String {
        format!(":{prefix}.{property}")
    }

    fn supports_paging(&self, style: PagingStyle) -> bool {
        self.paging.allows(style)
    }
}

/// 位置占位符：一律输出 `?`，参数按出现顺序记录在参数表中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionalStrategy {
    paging: PagingSupport,
}

impl PositionalStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paging_support(mut self, paging: PagingSupport) -> Self {
        self.paging = paging;
        self
    }
}

impl RenderingStrategy for PositionalStrategy {
    fn name(&self) -> &'static str {
        "Positional"
    }

    fn format_parameter(
        &self,
        _column: Option<&SqlColumn>,
        _prefix: &str,
        _parameter: &str,
    ) -> String {
        "?".to_string()
    }

    fn supports_paging(&self, style: PagingStyle) -> bool {
        self.paging.allows(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{SqlTable, SqlType};
    use pretty_assertions::assert_eq;

    #[test]
    fn mybatis_placeholder_carries_jdbc_type_and_handler() {
        let foo = SqlTable::new("foo");
        let id = foo.column("id").with_sql_type(SqlType::Integer);
        let s = MyBatis3Strategy::new();
        assert_eq!(
            s.format_parameter(Some(&id), s.parameter_prefix(), "p1"),
            "#{parameters.p1,jdbcType=INTEGER}"
        );
        assert_eq!(s.format_parameter(None, "", "p2"), "#{p2}");

        let name = foo
            .column("name")
            .with_sql_type(SqlType::Varchar)
            .with_type_handler("foo.NameTypeHandler");
        assert_eq!(
            s.format_record_binding(&name, "name"),
            "#{row.name,jdbcType=VARCHAR,typeHandler=foo.NameTypeHandler}"
        );
    }

    #[test]
    fn same_inputs_differ_only_by_strategy() {
        let foo = SqlTable::new("foo");
        let id = foo.column("id").with_sql_type(SqlType::Integer);
        let strategies: [&dyn RenderingStrategy; 3] = [
            &MyBatis3Strategy::new(),
            &SpringNamedParameterStrategy::new(),
            &PositionalStrategy::new(),
        ];
        let expected = ["#{parameters.p1,jdbcType=INTEGER}", ":p1", "?"];
        for (s, e) in strategies.iter().zip(expected) {
            assert_eq!(s.format_parameter(Some(&id), s.parameter_prefix(), "p1"), e);
        }
    }

    #[test]
    fn spring_record_bindings() {
        let foo = SqlTable::new("foo");
        let id = foo.column("id");
        let s = SpringNamedParameterStrategy::new();
        assert_eq!(s.format_record_binding(&id, "id"), ":id");
        assert_eq!(
            s.format_indexed_record_binding(&id, "records[2]", "id"),
            ":records[2].id"
        );
    }

    #[test]
    fn paging_support_is_configurable() {
        let s = PositionalStrategy::new().with_paging_support(PagingSupport::FetchFirstOnly);
        assert!(s.supports_paging(PagingStyle::FetchFirst));
        assert!(!s.supports_paging(PagingStyle::LimitOffset));
        assert!(MyBatis3Strategy::new().supports_paging(PagingStyle::LimitOffset));
        assert_eq!(PagingStyle::FetchFirst.to_string(), "fetch first");
    }

    #[test]
    fn custom_prefix() {
        let s = MyBatis3Strategy::new().with_parameter_prefix("p");
        assert_eq!(s.parameter_prefix(), "p");
    }
}
