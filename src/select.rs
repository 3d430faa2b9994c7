//! Select：查询块（QueryExpression）、select 语句模型、渲染与 builder。
//!
//! 一个 `SelectModel` 由若干查询块组成，后面的查询块带 `union` / `union all` 连接词；
//! `order by` 与分页只出现在最外层。

use crate::column::BasicColumn;
use crate::condition::Condition;
use crate::context::{RenderingContext, Sequence, TableAliasCalculator, TableAliases};
use crate::criterion::{Connector, Criterion};
use crate::error::{RenderError, Result};
use crate::fragment::{FragmentAndParameters, FragmentCollector};
use crate::join::{JoinModel, JoinSpecification, JoinType};
use crate::paging::{PagingBuilder, PagingModel};
use crate::provider::{StatementProvider, log_rendered};
use crate::sort::{OrderByModel, SortSpecification};
use crate::strategy::RenderingStrategy;
use crate::table::SqlTable;
use crate::where_clause::{WhereBuilder, WhereModel, WhereSupport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    UnionAll,
}

impl SetOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            SetOperator::Union => "union",
            SetOperator::UnionAll => "union all",
        }
    }
}

/// `from` / `join` 的对象：普通表或带别名的子查询。
#[derive(Debug, Clone)]
pub enum TableSource {
    Table(SqlTable),
    Subquery {
        select: Box<SelectModel>,
        alias: Option<String>,
    },
}

impl From<SqlTable> for TableSource {
    fn from(t: SqlTable) -> Self {
        Self::Table(t)
    }
}

impl From<&SqlTable> for TableSource {
    fn from(t: &SqlTable) -> Self {
        Self::Table(t.clone())
    }
}

impl TableSource {
    pub fn subquery(select: SelectModel, alias: impl Into<String>) -> Self {
        Self::Subquery {
            select: Box::new(select),
            alias: Some(alias.into()),
        }
    }

    pub(crate) fn render(&self, ctx: &RenderingContext<'_>) -> Result<FragmentAndParameters> {
        match self {
            Self::Table(t) => Ok(FragmentAndParameters::new(ctx.table_name(t))),
            Self::Subquery { select, alias } => {
                let f = select.render_fragment(ctx)?;
                Ok(f.map_fragment(|s| match alias {
                    Some(a) => format!("({s}) {a}"),
                    None => format!("({s})"),
                }))
            }
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Table(t) if t.name().trim().is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroupByModel {
    columns: Vec<BasicColumn>,
}

impl GroupByModel {
    pub fn new(columns: Vec<BasicColumn>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[BasicColumn] {
        &self.columns
    }

    fn render(&self, ctx: &RenderingContext<'_>) -> Result<Option<FragmentAndParameters>> {
        if self.columns.is_empty() {
            return Ok(None);
        }
        let mut fc = FragmentCollector::new();
        for c in &self.columns {
            fc.add(c.render(ctx)?);
        }
        Ok(Some(fc.join(", ").prepend("group by ")))
    }
}

/// 一个 `select ... from ... [join] [where] [group by] [having]` 查询块。
#[derive(Debug, Clone)]
pub struct QueryExpressionModel {
    connector: Option<SetOperator>,
    distinct: bool,
    columns: Vec<BasicColumn>,
    table: Option<TableSource>,
    table_aliases: TableAliases,
    join: Option<JoinModel>,
    where_: Option<WhereModel>,
    group_by: Option<GroupByModel>,
    having: Option<WhereModel>,
}

impl QueryExpressionModel {
    pub fn connector(&self) -> Option<SetOperator> {
        self.connector
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn columns(&self) -> &[BasicColumn] {
        &self.columns
    }

    pub fn table(&self) -> Option<&TableSource> {
        self.table.as_ref()
    }

    pub fn table_aliases(&self) -> &TableAliases {
        &self.table_aliases
    }

    pub fn join(&self) -> Option<&JoinModel> {
        self.join.as_ref()
    }

    pub fn where_model(&self) -> Option<&WhereModel> {
        self.where_.as_ref()
    }

    /// 有连接时所有列都被限定（未登记别名的表用表名），否则只有显式别名才限定。
    fn alias_calculator<'b>(&self) -> TableAliasCalculator<'b> {
        let aliases = self.table_aliases.clone();
        let calculator = if self.join.as_ref().is_some_and(|j| !j.is_empty()) {
            TableAliasCalculator::guaranteed(aliases)
        } else {
            TableAliasCalculator::explicit(aliases)
        };
        let joined = self
            .join
            .iter()
            .flat_map(|j| j.specifications())
            .map(|s| s.table());
        let local = self
            .table
            .iter()
            .chain(joined)
            .filter_map(|t| match t {
                TableSource::Table(t) => Some(t.id()),
                TableSource::Subquery { .. } => None,
            });
        calculator.with_local_tables(local)
    }

    fn render(&self, parent: &RenderingContext<'_>) -> Result<FragmentAndParameters> {
        let table = match &self.table {
            Some(t) if !t.is_blank() => t,
            _ => return Err(RenderError::MissingTable { statement: "select" }),
        };
        if self.columns.is_empty() {
            return Err(RenderError::EmptySelectList);
        }
        let ctx = parent.child(self.alias_calculator());

        let mut cols = FragmentCollector::new();
        for c in &self.columns {
            cols.add(c.render_for_select(&ctx)?);
        }
        let keyword = if self.distinct { "select distinct " } else { "select " };

        let mut fc = FragmentCollector::new();
        fc.add(cols.join(", ").prepend(keyword));
        fc.add(table.render(&ctx)?.prepend("from "));
        if let Some(j) = &self.join {
            fc.add(j.render(&ctx)?);
        }
        if let Some(w) = &self.where_ {
            fc.add_opt(w.render_fragment(&ctx)?);
        }
        if let Some(g) = &self.group_by {
            fc.add_opt(g.render(&ctx)?);
        }
        if let Some(h) = &self.having {
            fc.add_opt(h.render_with_keyword("having", &ctx)?);
        }
        Ok(fc.join(" "))
    }
}

#[derive(Debug, Clone)]
pub struct SelectModel {
    query_expressions: Vec<QueryExpressionModel>,
    order_by: Option<OrderByModel>,
    paging: Option<PagingModel>,
}

impl SelectModel {
    pub fn new(
        query_expressions: Vec<QueryExpressionModel>,
        order_by: Option<OrderByModel>,
        paging: Option<PagingModel>,
    ) -> Self {
        Self {
            query_expressions,
            order_by,
            paging,
        }
    }

    pub fn query_expressions(&self) -> &[QueryExpressionModel] {
        &self.query_expressions
    }

    pub fn order_by(&self) -> Option<&OrderByModel> {
        self.order_by.as_ref()
    }

    pub fn paging(&self) -> Option<PagingModel> {
        self.paging
    }

    /// 渲染为完整语句；每次调用使用新的 Sequence，参数 key 从 `p1` 开始。
    pub fn render(&self, strategy: &dyn RenderingStrategy) -> Result<StatementProvider> {
        let sequence = Sequence::new();
        let ctx = RenderingContext::new(strategy, &sequence);
        let provider = StatementProvider::from(self.render_fragment(&ctx)?);
        log_rendered("select", strategy.name(), provider.parameters().len(), provider.sql());
        Ok(provider)
    }

    /// 在已有上下文中渲染（子查询、`exists`、insert select），共享调用方的 Sequence。
    pub(crate) fn render_fragment(
        &self,
        ctx: &RenderingContext<'_>,
    ) -> Result<FragmentAndParameters> {
        if self.query_expressions.is_empty() {
            return Err(RenderError::EmptySelect);
        }
        let mut fc = FragmentCollector::new();
        for qe in &self.query_expressions {
            if let Some(op) = qe.connector {
                fc.add_text(op.as_str());
            }
            fc.add(qe.render(ctx)?);
        }
        if let Some(order_by) = &self.order_by {
            // 只有一个查询块时，排序列沿用该查询块的表别名
            let text = match self.query_expressions.as_slice() {
                [single] => order_by.render(&ctx.child(single.alias_calculator())),
                _ => order_by.render(ctx),
            };
            if let Some(text) = text {
                fc.add_text(text);
            }
        }
        if let Some(paging) = &self.paging {
            fc.add_opt(paging.render(ctx)?);
        }
        Ok(fc.join(" "))
    }
}

#[derive(Debug, Clone, Default)]
struct QueryExpressionBuilder {
    connector: Option<SetOperator>,
    distinct: bool,
    columns: Vec<BasicColumn>,
    table: Option<TableSource>,
    table_aliases: TableAliases,
    joins: Vec<JoinSpecification>,
    where_: WhereBuilder,
    group_by: Vec<BasicColumn>,
    having: WhereBuilder,
}

impl QueryExpressionBuilder {
    fn build(&self) -> QueryExpressionModel {
        QueryExpressionModel {
            connector: self.connector,
            distinct: self.distinct,
            columns: self.columns.clone(),
            table: self.table.clone(),
            table_aliases: self.table_aliases.clone(),
            join: if self.joins.is_empty() {
                None
            } else {
                Some(JoinModel::new(self.joins.clone()))
            },
            where_: self.where_.build_opt(),
            group_by: if self.group_by.is_empty() {
                None
            } else {
                Some(GroupByModel::new(self.group_by.clone()))
            },
            having: self.having.build_opt(),
        }
    }
}

/// Select builder。
///
/// ```ignore
/// let mut sb = SelectBuilder::new();
/// sb.select([&id, &name]).from(&foo).where_(&id, is_equal_to(3));
/// let provider = sb.build().render(&SpringNamedParameterStrategy::new())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    completed: Vec<QueryExpressionModel>,
    current: QueryExpressionBuilder,
    order_by: Vec<SortSpecification>,
    paging: PagingBuilder,
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select<C: Into<BasicColumn>>(
        &mut self,
        columns: impl IntoIterator<Item = C>,
    ) -> &mut Self {
        self.current.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn select_distinct<C: Into<BasicColumn>>(
        &mut self,
        columns: impl IntoIterator<Item = C>,
    ) -> &mut Self {
        self.current.distinct = true;
        self.select(columns)
    }

    pub fn from(&mut self, table: &SqlTable) -> &mut Self {
        self.current.table = Some(table.into());
        self
    }

    pub fn from_as(&mut self, table: &SqlTable, alias: impl Into<String>) -> &mut Self {
        self.current.table_aliases.insert(table.id(), alias.into());
        self.from(table)
    }

    pub fn from_subquery(&mut self, select: SelectModel, alias: impl Into<String>) -> &mut Self {
        self.current.table = Some(TableSource::subquery(select, alias));
        self
    }

    pub fn join_with_type(
        &mut self,
        join_type: JoinType,
        table: &SqlTable,
        alias: Option<&str>,
        on: impl IntoIterator<Item = Criterion>,
    ) -> &mut Self {
        if let Some(a) = alias {
            self.current.table_aliases.insert(table.id(), a.to_string());
        }
        self.current.joins.push(JoinSpecification::new(
            join_type,
            table.into(),
            on.into_iter().collect(),
        ));
        self
    }

    pub fn join(
        &mut self,
        table: &SqlTable,
        alias: Option<&str>,
        on: impl IntoIterator<Item = Criterion>,
    ) -> &mut Self {
        self.join_with_type(JoinType::Inner, table, alias, on)
    }

    pub fn left_join(
        &mut self,
        table: &SqlTable,
        alias: Option<&str>,
        on: impl IntoIterator<Item = Criterion>,
    ) -> &mut Self {
        self.join_with_type(JoinType::Left, table, alias, on)
    }

    pub fn right_join(
        &mut self,
        table: &SqlTable,
        alias: Option<&str>,
        on: impl IntoIterator<Item = Criterion>,
    ) -> &mut Self {
        self.join_with_type(JoinType::Right, table, alias, on)
    }

    pub fn full_join(
        &mut self,
        table: &SqlTable,
        alias: Option<&str>,
        on: impl IntoIterator<Item = Criterion>,
    ) -> &mut Self {
        self.join_with_type(JoinType::Full, table, alias, on)
    }

    pub fn join_subquery(
        &mut self,
        join_type: JoinType,
        select: SelectModel,
        alias: impl Into<String>,
        on: impl IntoIterator<Item = Criterion>,
    ) -> &mut Self {
        self.current.joins.push(JoinSpecification::new(
            join_type,
            TableSource::subquery(select, alias),
            on.into_iter().collect(),
        ));
        self
    }

    pub fn group_by<C: Into<BasicColumn>>(
        &mut self,
        columns: impl IntoIterator<Item = C>,
    ) -> &mut Self {
        self.current.group_by = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn having(&mut self, column: impl Into<BasicColumn>, condition: Condition) -> &mut Self {
        self.current
            .having
            .push(Connector::And, Criterion::new(column, condition));
        self
    }

    pub fn or_having(&mut self, column: impl Into<BasicColumn>, condition: Condition) -> &mut Self {
        self.current
            .having
            .push(Connector::Or, Criterion::new(column, condition));
        self
    }

    pub fn having_criterion(&mut self, criterion: Criterion) -> &mut Self {
        self.current.having.push(Connector::And, criterion);
        self
    }

    fn push_set_operator(&mut self, op: SetOperator) -> &mut Self {
        let finished = std::mem::take(&mut self.current);
        self.completed.push(finished.build());
        self.current.connector = Some(op);
        self
    }

    /// 结束当前查询块，后续的 `select` / `from` / `where_` 作用于新的查询块。
    pub fn union(&mut self) -> &mut Self {
        self.push_set_operator(SetOperator::Union)
    }

    pub fn union_all(&mut self) -> &mut Self {
        self.push_set_operator(SetOperator::UnionAll)
    }

    pub fn order_by<S: Into<SortSpecification>>(
        &mut self,
        columns: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.order_by = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.paging.limit(limit);
        self
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.paging.offset(offset);
        self
    }

    /// 与 `limit` 共用行数，后调用的一个生效。
    pub fn fetch_first(&mut self, rows: u64) -> &mut Self {
        self.paging.fetch_first(rows);
        self
    }

    pub fn build(&self) -> SelectModel {
        let mut query_expressions = self.completed.clone();
        query_expressions.push(self.current.build());
        let order_by = if self.order_by.is_empty() {
            None
        } else {
            Some(OrderByModel::new(self.order_by.clone()))
        };
        SelectModel::new(query_expressions, order_by, self.paging.build())
    }
}

impl WhereSupport for SelectBuilder {
    fn where_builder(&mut self) -> &mut WhereBuilder {
        &mut self.current.where_
    }
}
