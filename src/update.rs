//! Update：`update foo [a] set c1 = v1, c2 = v2 [where ...] [order by ...] [limit ...]`。

use crate::column::BasicColumn;
use crate::context::{RenderingContext, Sequence, TableAliasCalculator, TableAliases};
use crate::error::{RenderError, Result};
use crate::fragment::FragmentCollector;
use crate::mapping::{ColumnMapping, RecordTarget};
use crate::paging::PagingModel;
use crate::provider::{StatementProvider, log_rendered};
use crate::select::SelectModel;
use crate::sort::{OrderByModel, SortSpecification};
use crate::strategy::RenderingStrategy;
use crate::table::{SqlColumn, SqlTable};
use crate::value::SqlValue;
use crate::where_clause::{WhereBuilder, WhereModel, WhereSupport};

#[derive(Debug, Clone)]
pub struct UpdateModel {
    table: Option<SqlTable>,
    alias: Option<String>,
    mappings: Vec<ColumnMapping>,
    where_: Option<WhereModel>,
    order_by: Option<OrderByModel>,
    limit: Option<u64>,
}

impl UpdateModel {
    pub fn table(&self) -> Option<&SqlTable> {
        self.table.as_ref()
    }

    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    pub fn where_model(&self) -> Option<&WhereModel> {
        self.where_.as_ref()
    }

    /// `set` 子句先于 `where` 渲染，where 中的参数编号接在 set 之后。
    ///
    /// 所有映射都被跳过时照常渲染（`set` 后为空），由调用方避免。
    pub fn render(&self, strategy: &dyn RenderingStrategy) -> Result<StatementProvider> {
        let table = match &self.table {
            Some(t) if !t.name().trim().is_empty() => t,
            _ => return Err(RenderError::MissingTable { statement: "update" }),
        };
        let mut aliases = TableAliases::new();
        if let Some(a) = &self.alias {
            aliases.insert(table.id(), a.clone());
        }
        let sequence = Sequence::new();
        let root = RenderingContext::new(strategy, &sequence);
        let ctx = root.child(TableAliasCalculator::explicit(aliases));

        let mut sets = FragmentCollector::new();
        for m in &self.mappings {
            if let Some(v) = m.render_value(&ctx, RecordTarget::None, "update")? {
                let column = ctx.column_name(m.target());
                sets.add(v.prepend(&format!("{column} = ")));
            }
        }

        let mut fc = FragmentCollector::new();
        fc.add_text(format!("update {}", ctx.table_name(table)));
        if sets.is_empty() {
            fc.add_text("set");
        } else {
            fc.add(sets.join(", ").prepend("set "));
        }
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
        log_rendered(
            "update",
            strategy.name(),
            provider.parameters().len(),
            provider.sql(),
        );
        Ok(provider)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBuilder {
    table: Option<SqlTable>,
    alias: Option<String>,
    mappings: Vec<ColumnMapping>,
    where_: WhereBuilder,
    order_by: Vec<SortSpecification>,
    limit: Option<u64>,
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, table: &SqlTable) -> &mut Self {
        self.table = Some(table.clone());
        self
    }

    pub fn update_as(&mut self, table: &SqlTable, alias: impl Into<String>) -> &mut Self {
        self.alias = Some(alias.into());
        self.update(table)
    }

    pub fn mapping(&mut self, mapping: ColumnMapping) -> &mut Self {
        self.mappings.push(mapping);
        self
    }

    pub fn set(&mut self, column: &SqlColumn, value: impl Into<SqlValue>) -> &mut Self {
        self.mapping(ColumnMapping::value(column, value))
    }

    /// 值为 `None` 时不出现在 set 子句中。
    pub fn set_when_present<V: Into<SqlValue>>(
        &mut self,
        column: &SqlColumn,
        value: Option<V>,
    ) -> &mut Self {
        self.mapping(ColumnMapping::value_when_present(column, value))
    }

    pub fn set_supplier(
        &mut self,
        column: &SqlColumn,
        f: impl Fn() -> SqlValue + Send + Sync + 'static,
    ) -> &mut Self {
        self.mapping(ColumnMapping::supplier(column, f))
    }

    pub fn set_null(&mut self, column: &SqlColumn) -> &mut Self {
        self.mapping(ColumnMapping::null(column))
    }

    pub fn set_constant(&mut self, column: &SqlColumn, value: impl Into<String>) -> &mut Self {
        self.mapping(ColumnMapping::constant(column, value))
    }

    pub fn set_string_constant(
        &mut self,
        column: &SqlColumn,
        value: impl Into<String>,
    ) -> &mut Self {
        self.mapping(ColumnMapping::string_constant(column, value))
    }

    pub fn set_to_column(
        &mut self,
        column: &SqlColumn,
        source: impl Into<BasicColumn>,
    ) -> &mut Self {
        self.mapping(ColumnMapping::column(column, source))
    }

    pub fn set_to_select(&mut self, column: &SqlColumn, select: SelectModel) -> &mut Self {
        self.mapping(ColumnMapping::select(column, select))
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

    pub fn build(&self) -> UpdateModel {
        UpdateModel {
            table: self.table.clone(),
            alias: self.alias.clone(),
            mappings: self.mappings.clone(),
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

impl WhereSupport for UpdateBuilder {
    fn where_builder(&mut self) -> &mut WhereBuilder {
        &mut self.where_
    }
}
