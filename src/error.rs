//! 渲染错误：模型不完整或与渲染策略不兼容时，在 `render` 调用处同步失败。

use crate::strategy::PagingStyle;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("{statement} statement requires a table name")]
    MissingTable { statement: &'static str },
    #[error("query expression must select at least one column")]
    EmptySelectList,
    #[error("select statement must contain at least one query expression")]
    EmptySelect,
    #[error("insert into {table} has no column mappings to render")]
    EmptyInsertColumns { table: String },
    #[error("multi-row insert into {table} requires at least one record")]
    EmptyRecords { table: String },
    #[error("mapping for column {column} is not supported in {statement} statements")]
    UnsupportedMapping {
        column: String,
        statement: &'static str,
    },
    #[error("rendering strategy {strategy} does not support {style} paging")]
    UnsupportedPaging {
        strategy: &'static str,
        style: PagingStyle,
    },
    #[error("case expression requires at least one when clause")]
    EmptyCase,
}

pub type Result<T> = std::result::Result<T, RenderError>;

impl RenderError {
    pub(crate) fn unsupported_mapping(column: &str, statement: &'static str) -> Self {
        Self::UnsupportedMapping {
            column: column.to_string(),
            statement,
        }
    }
}
