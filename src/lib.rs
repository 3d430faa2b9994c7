//! halo-dynamic-sql：类型化的动态 SQL 语句模型与渲染管线。
//!
//! 先用 builder 构造不可变的语句模型，再用某个渲染策略渲染成
//! 参数化 SQL 与命名参数表：
//!
//! ```
//! use dynamic_sql::{SelectBuilder, SpringNamedParameterStrategy, SqlTable, WhereSupport, is_equal_to};
//!
//! let foo = SqlTable::new("foo");
//! let id = foo.column("id");
//! let mut sb = SelectBuilder::new();
//! sb.select([&id]).from(&foo).where_(&id, is_equal_to(3));
//!
//! let provider = sb.build().render(&SpringNamedParameterStrategy::new()).unwrap();
//! assert_eq!(provider.sql(), "select id from foo where id = :p1");
//! ```

pub mod case;
#[cfg(test)]
mod case_tests;
pub mod column;
pub mod condition;
#[cfg(test)]
mod condition_tests;
pub mod context;
pub mod converter;
pub mod criterion;
pub mod delete;
pub mod error;
pub mod fragment;
pub mod insert;
pub mod join;
pub mod macros;
pub mod mapping;
pub mod paging;
#[cfg(test)]
mod properties_tests;
pub mod provider;
pub mod select;
pub mod sort;
pub mod strategy;
pub mod table;
pub mod union;
pub mod update;
pub mod value;
pub mod where_clause;
#[cfg(test)]
mod where_clause_tests;

pub use crate::case::{
    CaseExpression, CaseValue, SearchedCaseBuilder, SimpleCaseBuilder, SimpleWhen,
};
pub use crate::column::{
    AggregateFunction, BasicColumn, avg, constant, count, count_all, count_distinct, function,
    lower, max, min, string_constant, sum, upper,
};
pub use crate::condition::*;
pub use crate::context::{RenderingContext, Sequence, TableAliasCalculator, TableAliases};
pub use crate::converter::{FnConverter, ParameterConverter};
pub use crate::criterion::{Connector, Criterion, Predicate, and, criterion, on, or};
pub use crate::delete::{DeleteBuilder, DeleteModel};
pub use crate::error::{RenderError, Result};
pub use crate::fragment::{FragmentAndParameters, ParameterMap};
pub use crate::insert::{
    BatchInsertBuilder, BatchInsertModel, GeneralInsertBuilder, GeneralInsertModel,
    InsertBuilder, InsertModel, InsertSelectBuilder, InsertSelectModel, MultiRowInsertBuilder,
    MultiRowInsertModel,
};
pub use crate::join::{JoinModel, JoinSpecification, JoinType};
pub use crate::mapping::{ColumnMapping, ValueSupplier};
pub use crate::paging::PagingModel;
pub use crate::provider::{
    BatchInsert, InsertStatementProvider, MultiRowInsertStatementProvider, StatementProvider,
};
pub use crate::select::{
    GroupByModel, QueryExpressionModel, SelectBuilder, SelectModel, SetOperator, TableSource,
};
pub use crate::sort::{OrderByModel, SortSpecification};
pub use crate::strategy::{
    MyBatis3Strategy, PagingStyle, PagingSupport, PositionalStrategy, RenderingStrategy,
    SpringNamedParameterStrategy,
};
pub use crate::table::{SqlColumn, SqlTable, SqlType, TableId};
pub use crate::union::{MultiSelectModel, UnionBuilder};
pub use crate::update::{UpdateBuilder, UpdateModel};
pub use crate::value::SqlValue;
pub use crate::where_clause::{WhereBuilder, WhereModel, WhereSupport};
