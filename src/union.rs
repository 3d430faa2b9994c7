//! MultiSelect：`(select ...) union (select ...) [order by] [分页]`。
//!
//! 与 `SelectBuilder::union` 不同，这里每个组成部分都是完整的 select 语句（可以带自己的
//! order by / 分页），渲染时各自加括号；外层的排序与分页作用于整个并集。

use crate::context::{RenderingContext, Sequence};
use crate::error::Result;
use crate::fragment::{FragmentAndParameters, FragmentCollector};
use crate::paging::{PagingBuilder, PagingModel};
use crate::provider::{StatementProvider, log_rendered};
use crate::select::{SelectModel, SetOperator};
use crate::sort::{OrderByModel, SortSpecification};
use crate::strategy::RenderingStrategy;

#[derive(Debug, Clone)]
pub struct MultiSelectModel {
    initial: SelectModel,
    unions: Vec<(SetOperator, SelectModel)>,
    order_by: Option<OrderByModel>,
    paging: Option<PagingModel>,
}

impl MultiSelectModel {
    pub fn new(
        initial: SelectModel,
        unions: Vec<(SetOperator, SelectModel)>,
        order_by: Option<OrderByModel>,
        paging: Option<PagingModel>,
    ) -> Self {
        Self {
            initial,
            unions,
            order_by,
            paging,
        }
    }

    pub fn initial(&self) -> &SelectModel {
        &self.initial
    }

    pub fn unions(&self) -> &[(SetOperator, SelectModel)] {
        &self.unions
    }

    pub fn render(&self, strategy: &dyn RenderingStrategy) -> Result<StatementProvider> {
        let sequence = Sequence::new();
        let ctx = RenderingContext::new(strategy, &sequence);
        let provider = StatementProvider::from(self.render_fragment(&ctx)?);
        log_rendered("multi-select", strategy.name(), provider.parameters().len(), provider.sql());
        Ok(provider)
    }

    fn render_fragment(&self, ctx: &RenderingContext<'_>) -> Result<FragmentAndParameters> {
        let wrap = |s: String| format!("({s})");
        let mut fc = FragmentCollector::new();
        fc.add(self.initial.render_fragment(ctx)?.map_fragment(wrap));
        for (op, select) in &self.unions {
            fc.add_text(op.as_str());
            fc.add(select.render_fragment(ctx)?.map_fragment(wrap));
        }
        if let Some(text) = self.order_by.as_ref().and_then(|o| o.render(ctx)) {
            fc.add_text(text);
        }
        if let Some(paging) = &self.paging {
            fc.add_opt(paging.render(ctx)?);
        }
        Ok(fc.join(" "))
    }
}

#[derive(Debug, Clone)]
pub struct UnionBuilder {
    initial: SelectModel,
    unions: Vec<(SetOperator, SelectModel)>,
    order_by: Vec<SortSpecification>,
    paging: PagingBuilder,
}

impl UnionBuilder {
    pub fn new(initial: SelectModel) -> Self {
        Self {
            initial,
            unions: Vec::new(),
            order_by: Vec::new(),
            paging: PagingBuilder::default(),
        }
    }

    pub fn union(&mut self, select: SelectModel) -> &mut Self {
        self.unions.push((SetOperator::Union, select));
        self
    }

    pub fn union_all(&mut self, select: SelectModel) -> &mut Self {
        self.unions.push((SetOperator::UnionAll, select));
        self
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

    pub fn build(&self) -> MultiSelectModel {
        let order_by = if self.order_by.is_empty() {
            None
        } else {
            Some(OrderByModel::new(self.order_by.clone()))
        };
        MultiSelectModel::new(
            self.initial.clone(),
            self.unions.clone(),
            order_by,
            self.paging.build(),
        )
    }
}
