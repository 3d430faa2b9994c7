//! Where 子句：模型、独立渲染以及 builder 共用的条件追加接口。

use crate::column::BasicColumn;
use crate::condition::Condition;
use crate::context::{RenderingContext, Sequence, TableAliasCalculator, TableAliases};
use crate::criterion::{Connector, Criterion, render_criteria};
use crate::error::Result;
use crate::fragment::FragmentAndParameters;
use crate::provider::{StatementProvider, log_rendered};
use crate::strategy::RenderingStrategy;

#[derive(Debug, Clone, Default)]
pub struct WhereModel {
    criteria: Vec<Criterion>,
}

impl WhereModel {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// 条件全部不渲染时返回 `None`，调用方据此省略整个子句。
    pub(crate) fn render_with_keyword(
        &self,
        keyword: &str,
        ctx: &RenderingContext<'_>,
    ) -> Result<Option<FragmentAndParameters>> {
        Ok(render_criteria(&self.criteria, ctx)?.map(|f| f.prepend(&format!("{keyword} "))))
    }

    pub(crate) fn render_fragment(
        &self,
        ctx: &RenderingContext<'_>,
    ) -> Result<Option<FragmentAndParameters>> {
        self.render_with_keyword("where", ctx)
    }

    /// 单独渲染 where 子句（例如拼接到手写 SQL 后面）。
    pub fn render(&self, strategy: &dyn RenderingStrategy) -> Result<Option<StatementProvider>> {
        self.render_with_aliases(strategy, TableAliases::new())
    }

    pub fn render_with_aliases(
        &self,
        strategy: &dyn RenderingStrategy,
        aliases: TableAliases,
    ) -> Result<Option<StatementProvider>> {
        let sequence = Sequence::new();
        let root = RenderingContext::new(strategy, &sequence);
        let ctx = root.child(TableAliasCalculator::explicit(aliases));
        let rendered = self.render_fragment(&ctx)?.map(StatementProvider::from);
        if let Some(p) = &rendered {
            log_rendered("where", strategy.name(), p.parameters().len(), p.sql());
        }
        Ok(rendered)
    }
}

/// 累积顶层条件。第一个条件的连接词在渲染时会被丢弃。
#[derive(Debug, Clone, Default)]
pub struct WhereBuilder {
    criteria: Vec<Criterion>,
}

impl WhereBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, connector: Connector, criterion: Criterion) -> &mut Self {
        self.criteria.push(criterion.with_connector(connector));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn build(&self) -> WhereModel {
        WhereModel::new(self.criteria.clone())
    }

    pub(crate) fn build_opt(&self) -> Option<WhereModel> {
        if self.criteria.is_empty() {
            None
        } else {
            Some(self.build())
        }
    }
}

/// 为带 where 子句的 builder 提供 `where_` / `and` / `or` 链式方法。
pub trait WhereSupport {
    #[doc(hidden)]
    fn where_builder(&mut self) -> &mut WhereBuilder;

    /// 追加条件；已有条件时以 `and` 连接。
    fn where_(&mut self, column: impl Into<BasicColumn>, condition: Condition) -> &mut Self {
        self.where_builder()
            .push(Connector::And, Criterion::new(column, condition));
        self
    }

    fn and(&mut self, column: impl Into<BasicColumn>, condition: Condition) -> &mut Self {
        self.where_builder()
            .push(Connector::And, Criterion::new(column, condition));
        self
    }

    fn or(&mut self, column: impl Into<BasicColumn>, condition: Condition) -> &mut Self {
        self.where_builder()
            .push(Connector::Or, Criterion::new(column, condition));
        self
    }

    fn where_criterion(&mut self, criterion: Criterion) -> &mut Self {
        self.where_builder().push(Connector::And, criterion);
        self
    }

    fn and_criterion(&mut self, criterion: Criterion) -> &mut Self {
        self.where_builder().push(Connector::And, criterion);
        self
    }

    fn or_criterion(&mut self, criterion: Criterion) -> &mut Self {
        self.where_builder().push(Connector::Or, criterion);
        self
    }
}

impl WhereSupport for WhereBuilder {
    fn where_builder(&mut self) -> &mut WhereBuilder {
        self
    }
}
