//! 一次渲染调用的上下文：参数序号、渲染策略与表别名计算。

use crate::fragment::FragmentAndParameters;
use crate::strategy::RenderingStrategy;
use crate::table::{SqlColumn, SqlTable, TableId};
use crate::value::SqlValue;
use std::cell::Cell;
use std::collections::HashMap;

/// 单调递增的参数序号，从 1 开始；每次顶层渲染各自持有一个。
#[derive(Debug)]
pub struct Sequence {
    next: Cell<u32>,
}

impl Default for Sequence {
    fn default() -> Self {
        Self { next: Cell::new(1) }
    }
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u32 {
        let n = self.next.get();
        self.next.set(n + 1);
        n
    }
}

/// 表别名映射，key 是表的身份而不是表名（自连接需要区分同名表）。
pub type TableAliases = HashMap<TableId, String>;

/// 表别名计算器。
///
/// - explicit：只有登记过别名的表才会限定列名；
/// - guaranteed：未登记别名的表用表名限定，保证连接查询中的列总是被限定。
///
/// 子查询使用子计算器：不属于当前查询块的表交给父计算器解析（关联子查询引用外层别名）。
#[derive(Debug, Clone)]
pub struct TableAliasCalculator<'a> {
    aliases: TableAliases,
    guaranteed: bool,
    local_tables: Vec<TableId>,
    parent: Option<&'a TableAliasCalculator<'a>>,
}

impl<'a> TableAliasCalculator<'a> {
    pub fn empty() -> Self {
        Self::explicit(TableAliases::new())
    }

    pub fn explicit(aliases: TableAliases) -> Self {
        Self {
            aliases,
            guaranteed: false,
            local_tables: Vec::new(),
            parent: None,
        }
    }

    pub fn guaranteed(aliases: TableAliases) -> Self {
        Self {
            aliases,
            guaranteed: true,
            ..Self::explicit(TableAliases::new())
        }
    }

    /// 登记属于当前查询块的表（`from` 与 `join` 的表）。
    pub fn with_local_tables(mut self, tables: impl IntoIterator<Item = TableId>) -> Self {
        self.local_tables.extend(tables);
        self
    }

    fn with_parent(mut self, parent: &'a TableAliasCalculator<'a>) -> Self {
        self.parent = Some(parent);
        self
    }

    fn is_local(&self, table: &SqlTable) -> bool {
        self.aliases.contains_key(&table.id()) || self.local_tables.contains(&table.id())
    }

    /// 限定列名所用的前缀。
    pub fn alias_for_column(&self, table: &SqlTable) -> Option<String> {
        if let Some(a) = self.aliases.get(&table.id()) {
            return Some(a.clone());
        }
        if let Some(parent) = self.parent
            && !self.is_local(table)
        {
            return parent.alias_for_column(table);
        }
        if self.guaranteed {
            Some(table.name().to_string())
        } else {
            None
        }
    }

    /// `from` / `join` 子句中表名后面的别名；只返回显式登记的别名。
    pub fn alias_for_table(&self, table: &SqlTable) -> Option<&str> {
        self.aliases.get(&table.id()).map(|a| a.as_str())
    }
}

/// 渲染上下文，贯穿整棵模型树（含嵌套子查询）；参数序号通过 `&Sequence` 共享。
#[derive(Debug)]
pub struct RenderingContext<'a> {
    strategy: &'a dyn RenderingStrategy,
    sequence: &'a Sequence,
    aliases: TableAliasCalculator<'a>,
}

impl<'a> RenderingContext<'a> {
    pub fn new(strategy: &'a dyn RenderingStrategy, sequence: &'a Sequence) -> Self {
        Self {
            strategy,
            sequence,
            aliases: TableAliasCalculator::empty(),
        }
    }

    /// 进入一个新的查询块：同一个 Sequence、同一个策略，新的别名计算器（父级回退）。
    pub fn child<'b>(&'b self, aliases: TableAliasCalculator<'b>) -> RenderingContext<'b> {
        RenderingContext {
            strategy: self.strategy,
            sequence: self.sequence,
            aliases: aliases.with_parent(&self.aliases),
        }
    }

    pub fn strategy(&self) -> &'a dyn RenderingStrategy {
        self.strategy
    }

    pub fn aliases(&self) -> &TableAliasCalculator<'a> {
        &self.aliases
    }

    pub fn next_parameter_name(&self) -> String {
        format!("p{}", self.sequence.next())
    }

    /// 分配一个参数 key，值经列转换器后放入参数表，返回占位符片段。
    pub fn bind(&self, column: Option<&SqlColumn>, value: SqlValue) -> FragmentAndParameters {
        let key = self.next_parameter_name();
        let value = match column {
            Some(c) => c.convert(value),
            None => value,
        };
        let placeholder =
            self.strategy
                .format_parameter(column, self.strategy.parameter_prefix(), &key);
        FragmentAndParameters::new(placeholder).with_parameter(key, value)
    }

    /// 列名（按需加限定前缀），不含列别名。
    pub fn column_name(&self, column: &SqlColumn) -> String {
        let qualifier = match column.qualifier() {
            Some(q) => Some(q.to_string()),
            None => self.aliases.alias_for_column(column.table()),
        };
        match qualifier {
            Some(q) => format!("{q}.{}", column.name()),
            None => column.name().to_string(),
        }
    }

    /// `foo` 或 `foo a`。
    pub fn table_name(&self, table: &SqlTable) -> String {
        match self.aliases.alias_for_table(table) {
            Some(a) => format!("{} {a}", table.name()),
            None => table.name().to_string(),
        }
    }
}
