//! Delete：`delete from foo [a] [where ...] [order by ...] [limit ...]`。

use crate::context::{RenderingContext, Sequence, TableAliasCalculator, TableAliases};
use crate::error::{RenderError, Result};
use crate::fragment::FragmentCollector;
use crate::paging::PagingModel;
use crate::provider::{StatementProvider, log_rendered};
use crate::sort::{OrderByModel, SortSpecification};
use crate::strategy::RenderingStrategy;
use crate::table::SqlTable;
use crate::where_clause::{WhereBuilder, WhereModel, WhereSupport};

#[derive(Debug, Clone)]
pub struct DeleteModel {
    table: Option<SqlTable>,
    alias: Option<String>,
    where_: Option<WhereModel>,
    order_by: Option<OrderByModel>,
    limit: Option<u64>,
}

impl DeleteModel {
    pub fn table(&self) -> Option<&SqlTable> {
        self.table.as_ref()
    }

    pub fn where_model(&self) -> Option<&WhereModel> {
        self.where_.as_ref()
    }

    pub fn render(&self, strategy: &dyn RenderingStrategy) -> Result<StatementProvider> {
        let table = match &self.table {
            Some(t) if !t.name().trim().is_empty() => t,
            _ => return Err(RenderError::MissingTable { statement: "delete" }),
        };
        let mut aliases = TableAliases::new();
        if let Some(a) = &self.alias {
            aliases.insert(table.id(), a.clone());
        }
        let sequence = Sequence::new();
        let root = RenderingContext::new(strategy, &sequence);
        let ctx = root.child(TableAliasCalculator::explicit(aliases));

        let mut fc = FragmentCollector::new();
        fc.add_text(format!("delete from {}", ctx.table_name(table)));
        if let Some(w) = &self.where_ {
            fc.add_opt(w.render_fragment(&ctx)?);
        }
        if let Some(text) = self.order_by.as_ref().and_then(|o| o.render(&ctx)) {
            fc.add_text(text);
        }
        if let Some(n) = self.limit {
            let paging = PagingModel::LimitOffset {
                limit: Some(n),
                offset: None,
            };
            fc.add_opt(paging.render(&ctx)?);
        }
        let provider = StatementProvider::from(fc.join(" "));
        log_rendered("delete", strategy.name(), provider.parameters().len(), provider.sql());
        Ok(provider)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteBuilder {
    table: Option<SqlTable>,
    alias: Option<String>,
    where_: WhereBuilder,
    order_by: Vec<SortSpecification>,
    limit: Option<u64>,
}

impl DeleteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete_from(&mut self, table: &SqlTable) -> &mut Self {
        self.table = Some(table.clone());
        self
    }

    pub fn delete_from_as(&mut self, table: &SqlTable, alias: impl Into<String>) -> &mut Self {
        self.alias = Some(alias.into());
        self.delete_from(table)
    }

    pub fn order_by<S: Into<SortSpecification>>(
        &mut self,
        columns: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.order_by = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    pub fn build(&self) -> DeleteModel {
        DeleteModel {
            table: self.table.clone(),
            alias: self.alias.clone(),
            where_: self.where_.build_opt(),
            order_by: if self.order_by.is_empty() {
                None
            } else {
                Some(OrderByModel::new(self.order_by.clone()))
            },
            limit: self.limit,
        }
    }
}

impl WhereSupport for DeleteBuilder {
    fn where_builder(&mut self) -> &mut WhereBuilder {
        &mut self.where_
    }
}
