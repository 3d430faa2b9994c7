//! 列映射：insert 的列/值对应关系以及 update 的 `set` 子句。
//!
//! 不同语句支持的映射种类不同，渲染时遇到不支持的映射返回 `UnsupportedMapping`。

use crate::column::{BasicColumn, quote_string};
use crate::context::RenderingContext;
use crate::error::{RenderError, Result};
use crate::fragment::FragmentAndParameters;
use crate::select::SelectModel;
use crate::table::SqlColumn;
use crate::value::SqlValue;
use std::fmt;
use std::sync::Arc;

pub type ValueSupplier = Arc<dyn Fn() -> SqlValue + Send + Sync>;

#[derive(Clone)]
pub enum ColumnMapping {
    Null {
        column: SqlColumn,
    },
    /// 原样输出，不转义。
    Constant {
        column: SqlColumn,
        value: String,
    },
    StringConstant {
        column: SqlColumn,
        value: String,
    },
    Value {
        column: SqlColumn,
        value: SqlValue,
    },
    /// 渲染时才取值。
    ValueSupplier {
        column: SqlColumn,
        supplier: ValueSupplier,
    },
    /// 绑定到记录的属性。
    Property {
        column: SqlColumn,
        property: String,
    },
    Column {
        column: SqlColumn,
        source: BasicColumn,
    },
    Select {
        column: SqlColumn,
        select: Box<SelectModel>,
    },
    /// 值缺失的 when-present 映射，渲染时跳过。
    Empty {
        column: SqlColumn,
    },
}

impl fmt::Debug for ColumnMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null { column } => f.debug_struct("Null").field("column", column).finish(),
            Self::Constant { column, value } => f
                .debug_struct("Constant")
                .field("column", column)
                .field("value", value)
                .finish(),
            Self::StringConstant { column, value } => f
                .debug_struct("StringConstant")
                .field("column", column)
                .field("value", value)
                .finish(),
            Self::Value { column, value } => f
                .debug_struct("Value")
                .field("column", column)
                .field("value", value)
                .finish(),
            Self::ValueSupplier { column, .. } => f
                .debug_struct("ValueSupplier")
                .field("column", column)
                .finish_non_exhaustive(),
            Self::Property { column, property } => f
                .debug_struct("Property")
                .field("column", column)
                .field("property", property)
                .finish(),
            Self::Column { column, source } => f
                .debug_struct("Column")
                .field("column", column)
                .field("source", source)
                .finish(),
            Self::Select { column, select } => f
                .debug_struct("Select")
                .field("column", column)
                .field("select", select)
                .finish(),
            Self::Empty { column } => f.debug_struct("Empty").field("column", column).finish(),
        }
    }
}

/// 属性绑定的目标。
#[derive(Debug, Clone, Copy)]
pub(crate) enum RecordTarget<'r> {
    /// 单条记录：`#{row.x}` / `:x`；同时接受显式值。
    Row,
    /// 批量插入：与 `Row` 相同的属性占位符，但不接受显式值。
    Batch,
    /// 多行插入中的第 N 条：`#{records[0].x}`。
    Indexed(&'r str),
    /// 没有记录（general insert、update）。
    None,
}

impl ColumnMapping {
    pub fn null(column: &SqlColumn) -> Self {
        Self::Null {
            column: column.clone(),
        }
    }

    pub fn constant(column: &SqlColumn, value: impl Into<String>) -> Self {
        Self::Constant {
            column: column.clone(),
            value: value.into(),
        }
    }

    pub fn string_constant(column: &SqlColumn, value: impl Into<String>) -> Self {
        Self::StringConstant {
            column: column.clone(),
            value: value.into(),
        }
    }

    pub fn value(column: &SqlColumn, value: impl Into<SqlValue>) -> Self {
        Self::Value {
            column: column.clone(),
            value: value.into(),
        }
    }

    /// 值为 `None` 时该列被跳过。
    pub fn value_when_present<T: Into<SqlValue>>(column: &SqlColumn, value: Option<T>) -> Self {
        match value {
            Some(v) => Self::value(column, v),
            None => Self::Empty {
                column: column.clone(),
            },
        }
    }

    pub fn supplier(column: &SqlColumn, f: impl Fn() -> SqlValue + Send + Sync + 'static) -> Self {
        Self::ValueSupplier {
            column: column.clone(),
            supplier: Arc::new(f),
        }
    }

    pub fn property(column: &SqlColumn, property: impl Into<String>) -> Self {
        Self::Property {
            column: column.clone(),
            property: property.into(),
        }
    }

    /// 记录属性存在时才插入该列；属性是否存在由调用方在构建时判断。
    pub fn property_when_present(
        column: &SqlColumn,
        property: impl Into<String>,
        present: bool,
    ) -> Self {
        if present {
            Self::property(column, property)
        } else {
            Self::Empty {
                column: column.clone(),
            }
        }
    }

    pub fn column(column: &SqlColumn, source: impl Into<BasicColumn>) -> Self {
        Self::Column {
            column: column.clone(),
            source: source.into(),
        }
    }

    pub fn select(column: &SqlColumn, select: SelectModel) -> Self {
        Self::Select {
            column: column.clone(),
            select: Box::new(select),
        }
    }

    pub fn target(&self) -> &SqlColumn {
        match self {
            Self::Null { column }
            | Self::Constant { column, .. }
            | Self::StringConstant { column, .. }
            | Self::Value { column, .. }
            | Self::ValueSupplier { column, .. }
            | Self::Property { column, .. }
            | Self::Column { column, .. }
            | Self::Select { column, .. }
            | Self::Empty { column } => column,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    /// 渲染值部分；`Empty` 返回 `None`。
    ///
    /// - 单条记录（`Row`）：属性、字面量与显式值（value / supplier）；
    /// - 多行与批量（`Indexed` / `Batch`）：只接受属性与字面量；
    /// - 没有记录（`None`）：除属性外的所有映射。
    pub(crate) fn render_value(
        &self,
        ctx: &RenderingContext<'_>,
        record: RecordTarget<'_>,
        statement: &'static str,
    ) -> Result<Option<FragmentAndParameters>> {
        let unsupported =
            |c: &SqlColumn| Err(RenderError::unsupported_mapping(c.name(), statement));
        let accepts_values = matches!(record, RecordTarget::Row | RecordTarget::None);
        let accepts_expressions = matches!(record, RecordTarget::None);
        let f = match self {
            Self::Empty { .. } => return Ok(None),
            Self::Null { .. } => FragmentAndParameters::new("null"),
            Self::Constant { value, .. } => FragmentAndParameters::new(value.clone()),
            Self::StringConstant { value, .. } => FragmentAndParameters::new(quote_string(value)),
            Self::Property { column, property } => {
                let strategy = ctx.strategy();
                match record {
                    RecordTarget::Row | RecordTarget::Batch => {
                        FragmentAndParameters::new(strategy.format_record_binding(column, property))
                    }
                    RecordTarget::Indexed(prefix) => FragmentAndParameters::new(
                        strategy.format_indexed_record_binding(column, prefix, property),
                    ),
                    RecordTarget::None => return unsupported(column),
                }
            }
            Self::Value { column, .. } | Self::ValueSupplier { column, .. } if !accepts_values => {
                return unsupported(column);
            }
            Self::Column { column, .. } | Self::Select { column, .. } if !accepts_expressions => {
                return unsupported(column);
            }
            Self::Value { column, value } => ctx.bind(Some(column), value.clone()),
            Self::ValueSupplier { column, supplier } => ctx.bind(Some(column), supplier()),
            Self::Column { source, .. } => source.render(ctx)?,
            Self::Select { select, .. } => select
                .render_fragment(ctx)?
                .map_fragment(|s| format!("({s})")),
        };
        Ok(Some(f))
    }
}
