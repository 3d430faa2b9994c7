//! Insert：单条记录、多行、批量、无记录（general）以及 insert select 五种模型。

use crate::column::BasicColumn;
use crate::context::{RenderingContext, Sequence};
use crate::error::{RenderError, Result};
use crate::fragment::{FragmentAndParameters, FragmentCollector};
use crate::mapping::{ColumnMapping, RecordTarget};
use crate::provider::{
    BatchInsert, InsertStatementProvider, MultiRowInsertStatementProvider, StatementProvider,
    log_rendered,
};
use crate::select::SelectModel;
use crate::strategy::RenderingStrategy;
use crate::table::{SqlColumn, SqlTable};
use crate::value::SqlValue;

fn check_table<'t>(table: Option<&'t SqlTable>, statement: &'static str) -> Result<&'t SqlTable> {
    match table {
        Some(t) if !t.name().trim().is_empty() => Ok(t),
        _ => Err(RenderError::MissingTable { statement }),
    }
}

/// 渲染一行：返回列名列表与 `(v1, v2, ...)` 值片段，跳过 `Empty` 映射。
fn render_row(
    mappings: &[ColumnMapping],
    ctx: &RenderingContext<'_>,
    record: RecordTarget<'_>,
    statement: &'static str,
) -> Result<(Vec<String>, FragmentAndParameters)> {
    let mut columns = Vec::with_capacity(mappings.len());
    let mut values = FragmentCollector::new();
    for m in mappings {
        if let Some(v) = m.render_value(ctx, record, statement)? {
            columns.push(m.target().name().to_string());
            values.add(v);
        }
    }
    Ok((columns, values.join_wrapped(", ", "(", ")")))
}

fn column_list(columns: &[String]) -> String {
    format!("({})", columns.join(", "))
}

/// 单条记录插入：`insert into foo (id, first_name) values (#{row.id}, #{row.firstName})`。
#[derive(Debug, Clone)]
pub struct InsertModel<T> {
    row: T,
    table: Option<SqlTable>,
    mappings: Vec<ColumnMapping>,
}

impl<T: Clone> InsertModel<T> {
    pub fn row(&self) -> &T {
        &self.row
    }

    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    pub fn render(&self, strategy: &dyn RenderingStrategy) -> Result<InsertStatementProvider<T>> {
        let table = check_table(self.table.as_ref(), "insert")?;
        let sequence = Sequence::new();
        let ctx = RenderingContext::new(strategy, &sequence);
        let (columns, values) = render_row(&self.mappings, &ctx, RecordTarget::Row, "insert")?;
        if columns.is_empty() {
            return Err(RenderError::EmptyInsertColumns {
                table: table.name().to_string(),
            });
        }
        let (sql, parameters) = values
            .prepend(&format!(
                "insert into {} {} values ",
                table.name(),
                column_list(&columns)
            ))
            .into_parts();
        log_rendered("insert", strategy.name(), parameters.len(), &sql);
        Ok(InsertStatementProvider::new(sql, parameters, self.row.clone()))
    }
}

/// 多行插入：每条记录一个值组，所有记录共用同一组映射。
#[derive(Debug, Clone)]
pub struct MultiRowInsertModel<T> {
    records: Vec<T>,
    table: Option<SqlTable>,
    mappings: Vec<ColumnMapping>,
}

impl<T: Clone> MultiRowInsertModel<T> {
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn render(
        &self,
        strategy: &dyn RenderingStrategy,
    ) -> Result<MultiRowInsertStatementProvider<T>> {
        let table = check_table(self.table.as_ref(), "insert")?;
        if self.records.is_empty() {
            return Err(RenderError::EmptyRecords {
                table: table.name().to_string(),
            });
        }
        let sequence = Sequence::new();
        let ctx = RenderingContext::new(strategy, &sequence);

        let mut columns = Vec::new();
        let mut groups = FragmentCollector::new();
        for i in 0..self.records.len() {
            let prefix = format!("records[{i}]");
            let (cols, values) =
                render_row(&self.mappings, &ctx, RecordTarget::Indexed(&prefix), "insert")?;
            columns = cols;
            groups.add(values);
        }
        if columns.is_empty() {
            return Err(RenderError::EmptyInsertColumns {
                table: table.name().to_string(),
            });
        }
        let sql = format!(
            "insert into {} {} values {}",
            table.name(),
            column_list(&columns),
            groups.join(", ").fragment()
        );
        log_rendered("multi-row insert", strategy.name(), 0, &sql);
        Ok(MultiRowInsertStatementProvider::new(sql, self.records.clone()))
    }
}

/// 批量插入：只渲染一行占位符，由执行层对每条记录重复绑定执行。
#[derive(Debug, Clone)]
pub struct BatchInsertModel<T> {
    records: Vec<T>,
    table: Option<SqlTable>,
    mappings: Vec<ColumnMapping>,
}

impl<T: Clone> BatchInsertModel<T> {
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn render(&self, strategy: &dyn RenderingStrategy) -> Result<BatchInsert<T>> {
        let table = check_table(self.table.as_ref(), "insert")?;
        let sequence = Sequence::new();
        let ctx = RenderingContext::new(strategy, &sequence);
        let (columns, values) =
            render_row(&self.mappings, &ctx, RecordTarget::Batch, "batch insert")?;
        if columns.is_empty() {
            return Err(RenderError::EmptyInsertColumns {
                table: table.name().to_string(),
            });
        }
        let sql = format!(
            "insert into {} {} values {}",
            table.name(),
            column_list(&columns),
            values.fragment()
        );
        log_rendered("batch insert", strategy.name(), 0, &sql);
        Ok(BatchInsert::new(sql, self.records.clone()))
    }
}

/// 没有记录的插入：值直接绑定为参数。
#[derive(Debug, Clone)]
pub struct GeneralInsertModel {
    table: Option<SqlTable>,
    mappings: Vec<ColumnMapping>,
}

impl GeneralInsertModel {
    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    pub fn render(&self, strategy: &dyn RenderingStrategy) -> Result<StatementProvider> {
        let table = check_table(self.table.as_ref(), "insert")?;
        let sequence = Sequence::new();
        let ctx = RenderingContext::new(strategy, &sequence);
        let (columns, values) = render_row(&self.mappings, &ctx, RecordTarget::None, "insert")?;
        if columns.is_empty() {
            return Err(RenderError::EmptyInsertColumns {
                table: table.name().to_string(),
            });
        }
        let provider = StatementProvider::from(values.prepend(&format!(
            "insert into {} {} values ",
            table.name(),
            column_list(&columns)
        )));
        log_rendered(
            "insert",
            strategy.name(),
            provider.parameters().len(),
            provider.sql(),
        );
        Ok(provider)
    }
}

/// `insert into foo [(a, b)] select ...`。
#[derive(Debug, Clone)]
pub struct InsertSelectModel {
    table: Option<SqlTable>,
    columns: Option<Vec<SqlColumn>>,
    select: SelectModel,
}

impl InsertSelectModel {
    pub fn select(&self) -> &SelectModel {
        &self.select
    }

    pub fn render(&self, strategy: &dyn RenderingStrategy) -> Result<StatementProvider> {
        let table = check_table(self.table.as_ref(), "insert")?;
        let sequence = Sequence::new();
        let ctx = RenderingContext::new(strategy, &sequence);
        let head = match &self.columns {
            Some(cols) => {
                let names: Vec<String> = cols.iter().map(|c| c.name().to_string()).collect();
                format!("insert into {} {} ", table.name(), column_list(&names))
            }
            None => format!("insert into {} ", table.name()),
        };
        let provider = StatementProvider::from(self.select.render_fragment(&ctx)?.prepend(&head));
        log_rendered(
            "insert select",
            strategy.name(),
            provider.parameters().len(),
            provider.sql(),
        );
        Ok(provider)
    }
}

/// 记录插入 builder 共用的映射方法。
macro_rules! record_mapping_methods {
    () => {
        pub fn into_table(&mut self, table: &SqlTable) -> &mut Self {
            self.table = Some(table.clone());
            self
        }

        pub fn mapping(&mut self, mapping: ColumnMapping) -> &mut Self {
            self.mappings.push(mapping);
            self
        }

        pub fn map_property(
            &mut self,
            column: &SqlColumn,
            property: impl Into<String>,
        ) -> &mut Self {
            self.mapping(ColumnMapping::property(column, property))
        }

        pub fn map_property_when_present(
            &mut self,
            column: &SqlColumn,
            property: impl Into<String>,
            present: bool,
        ) -> &mut Self {
            self.mapping(ColumnMapping::property_when_present(column, property, present))
        }

        pub fn map_null(&mut self, column: &SqlColumn) -> &mut Self {
            self.mapping(ColumnMapping::null(column))
        }

        pub fn map_constant(&mut self, column: &SqlColumn, value: impl Into<String>) -> &mut Self {
            self.mapping(ColumnMapping::constant(column, value))
        }

        pub fn map_string_constant(
            &mut self,
            column: &SqlColumn,
            value: impl Into<String>,
        ) -> &mut Self {
            self.mapping(ColumnMapping::string_constant(column, value))
        }
    };
}

#[derive(Debug, Clone)]
pub struct InsertBuilder<T> {
    row: T,
    table: Option<SqlTable>,
    mappings: Vec<ColumnMapping>,
}

impl<T: Clone> InsertBuilder<T> {
    pub fn new(row: T) -> Self {
        Self {
            row,
            table: None,
            mappings: Vec::new(),
        }
    }

    record_mapping_methods!();

    pub fn build(&self) -> InsertModel<T> {
        InsertModel {
            row: self.row.clone(),
            table: self.table.clone(),
            mappings: self.mappings.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MultiRowInsertBuilder<T> {
    records: Vec<T>,
    table: Option<SqlTable>,
    mappings: Vec<ColumnMapping>,
}

impl<T: Clone> MultiRowInsertBuilder<T> {
    pub fn new(records: impl IntoIterator<Item = T>) -> Self {
        Self {
            records: records.into_iter().collect(),
            table: None,
            mappings: Vec::new(),
        }
    }

    record_mapping_methods!();

    pub fn build(&self) -> MultiRowInsertModel<T> {
        MultiRowInsertModel {
            records: self.records.clone(),
            table: self.table.clone(),
            mappings: self.mappings.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchInsertBuilder<T> {
    records: Vec<T>,
    table: Option<SqlTable>,
    mappings: Vec<ColumnMapping>,
}

impl<T: Clone> BatchInsertBuilder<T> {
    pub fn new(records: impl IntoIterator<Item = T>) -> Self {
        Self {
            records: records.into_iter().collect(),
            table: None,
            mappings: Vec::new(),
        }
    }

    record_mapping_methods!();

    pub fn build(&self) -> BatchInsertModel<T> {
        BatchInsertModel {
            records: self.records.clone(),
            table: self.table.clone(),
            mappings: self.mappings.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeneralInsertBuilder {
    table: Option<SqlTable>,
    mappings: Vec<ColumnMapping>,
}

impl GeneralInsertBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_table(&mut self, table: &SqlTable) -> &mut Self {
        self.table = Some(table.clone());
        self
    }

    pub fn mapping(&mut self, mapping: ColumnMapping) -> &mut Self {
        self.mappings.push(mapping);
        self
    }

    pub fn set(&mut self, column: &SqlColumn, value: impl Into<SqlValue>) -> &mut Self {
        self.mapping(ColumnMapping::value(column, value))
    }

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

    pub fn build(&self) -> GeneralInsertModel {
        GeneralInsertModel {
            table: self.table.clone(),
            mappings: self.mappings.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InsertSelectBuilder {
    table: Option<SqlTable>,
    columns: Option<Vec<SqlColumn>>,
    select: SelectModel,
}

impl InsertSelectBuilder {
    pub fn new(select: SelectModel) -> Self {
        Self {
            table: None,
            columns: None,
            select,
        }
    }

    pub fn into_table(&mut self, table: &SqlTable) -> &mut Self {
        self.table = Some(table.clone());
        self
    }

    pub fn with_columns<'c>(
        &mut self,
        columns: impl IntoIterator<Item = &'c SqlColumn>,
    ) -> &mut Self {
        self.columns = Some(columns.into_iter().cloned().collect());
        self
    }

    pub fn build(&self) -> InsertSelectModel {
        InsertSelectModel {
            table: self.table.clone(),
            columns: self.columns.clone(),
            select: self.select.clone(),
        }
    }
}
