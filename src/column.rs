//! 可出现在选择列表、条件左侧或排序中的列表达式。

use crate::case::CaseExpression;
use crate::context::RenderingContext;
use crate::error::Result;
use crate::fragment::{FragmentAndParameters, FragmentCollector};
use crate::table::SqlColumn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    CountAll,
    Count,
    CountDistinct,
    Max,
    Min,
    Avg,
    Sum,
}

#[derive(Debug, Clone)]
pub enum BasicColumn {
    Column(SqlColumn),
    Aggregate {
        function: AggregateFunction,
        column: Option<Box<BasicColumn>>,
        alias: Option<String>,
    },
    Function {
        name: String,
        args: Vec<BasicColumn>,
        alias: Option<String>,
    },
    /// 原样输出的 SQL 常量。
    Constant { value: String, alias: Option<String> },
    /// 加引号的字符串常量，`'` 转义为 `''`。
    StringConstant { value: String, alias: Option<String> },
    Case {
        expression: Box<CaseExpression>,
        alias: Option<String>,
    },
}

impl From<SqlColumn> for BasicColumn {
    fn from(c: SqlColumn) -> Self {
        Self::Column(c)
    }
}

impl From<&SqlColumn> for BasicColumn {
    fn from(c: &SqlColumn) -> Self {
        Self::Column(c.clone())
    }
}

impl From<CaseExpression> for BasicColumn {
    fn from(e: CaseExpression) -> Self {
        Self::Case {
            expression: Box::new(e),
            alias: None,
        }
    }
}

pub fn count_all() -> BasicColumn {
    BasicColumn::Aggregate {
        function: AggregateFunction::CountAll,
        column: None,
        alias: None,
    }
}

fn aggregate(function: AggregateFunction, column: impl Into<BasicColumn>) -> BasicColumn {
    BasicColumn::Aggregate {
        function,
        column: Some(Box::new(column.into())),
        alias: None,
    }
}

pub fn count(column: impl Into<BasicColumn>) -> BasicColumn {
    aggregate(AggregateFunction::Count, column)
}

pub fn count_distinct(column: impl Into<BasicColumn>) -> BasicColumn {
    aggregate(AggregateFunction::CountDistinct, column)
}

pub fn max(column: impl Into<BasicColumn>) -> BasicColumn {
    aggregate(AggregateFunction::Max, column)
}

pub fn min(column: impl Into<BasicColumn>) -> BasicColumn {
    aggregate(AggregateFunction::Min, column)
}

pub fn avg(column: impl Into<BasicColumn>) -> BasicColumn {
    aggregate(AggregateFunction::Avg, column)
}

pub fn sum(column: impl Into<BasicColumn>) -> BasicColumn {
    aggregate(AggregateFunction::Sum, column)
}

pub fn function(name: impl Into<String>, args: Vec<BasicColumn>) -> BasicColumn {
    BasicColumn::Function {
        name: name.into(),
        args,
        alias: None,
    }
}

pub fn upper(column: impl Into<BasicColumn>) -> BasicColumn {
    function("upper", vec![column.into()])
}

pub fn lower(column: impl Into<BasicColumn>) -> BasicColumn {
    function("lower", vec![column.into()])
}

pub fn constant(value: impl Into<String>) -> BasicColumn {
    BasicColumn::Constant {
        value: value.into(),
        alias: None,
    }
}

pub fn string_constant(value: impl Into<String>) -> BasicColumn {
    BasicColumn::StringConstant {
        value: value.into(),
        alias: None,
    }
}

pub(crate) fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

impl BasicColumn {
    pub fn as_(self, alias: impl Into<String>) -> Self {
        let new_alias = alias.into();
        match self {
            Self::Column(c) => Self::Column(c.as_(new_alias)),
            Self::Aggregate {
                function, column, ..
            } => Self::Aggregate {
                function,
                column,
                alias: Some(new_alias),
            },
            Self::Function { name, args, .. } => Self::Function {
                name,
                args,
                alias: Some(new_alias),
            },
            Self::Constant { value, .. } => Self::Constant {
                value,
                alias: Some(new_alias),
            },
            Self::StringConstant { value, .. } => Self::StringConstant {
                value,
                alias: Some(new_alias),
            },
            Self::Case { expression, .. } => Self::Case {
                expression,
                alias: Some(new_alias),
            },
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Column(c) => c.alias(),
            Self::Aggregate { alias, .. }
            | Self::Function { alias, .. }
            | Self::Constant { alias, .. }
            | Self::StringConstant { alias, .. }
            | Self::Case { alias, .. } => alias.as_deref(),
        }
    }

    /// 与该表达式比较的值绑定时，使用哪个列的类型元数据与转换器。
    pub fn binding_column(&self) -> Option<&SqlColumn> {
        match self {
            Self::Column(c) => Some(c),
            Self::Aggregate {
                function: AggregateFunction::CountAll,
                ..
            }
            | Self::Aggregate {
                function: AggregateFunction::Count,
                ..
            }
            | Self::Aggregate {
                function: AggregateFunction::CountDistinct,
                ..
            } => None,
            Self::Aggregate { column, .. } => column.as_ref().and_then(|c| c.binding_column()),
            Self::Function { args, .. } => args.first().and_then(|c| c.binding_column()),
            Self::Constant { .. } | Self::StringConstant { .. } | Self::Case { .. } => None,
        }
    }

    /// 渲染表达式本身（不含 `as alias`），用于条件左侧、group by、函数参数等。
    pub fn render(&self, ctx: &RenderingContext<'_>) -> Result<FragmentAndParameters> {
        match self {
            Self::Column(c) => Ok(FragmentAndParameters::new(ctx.column_name(c))),
            Self::Aggregate {
                function, column, ..
            } => {
                let inner = match column {
                    Some(c) => c.render(ctx)?,
                    None => FragmentAndParameters::new("*"),
                };
                Ok(inner.map_fragment(|s| match function {
                    AggregateFunction::CountAll | AggregateFunction::Count => {
                        format!("count({s})")
                    }
                    AggregateFunction::CountDistinct => format!("count(distinct {s})"),
                    AggregateFunction::Max => format!("max({s})"),
                    AggregateFunction::Min => format!("min({s})"),
                    AggregateFunction::Avg => format!("avg({s})"),
                    AggregateFunction::Sum => format!("sum({s})"),
                }))
            }
            Self::Function { name, args, .. } => {
                let mut fc = FragmentCollector::new();
                for a in args {
                    fc.add(a.render(ctx)?);
                }
                Ok(fc.join_wrapped(", ", &format!("{name}("), ")"))
            }
            Self::Constant { value, .. } => Ok(FragmentAndParameters::new(value.clone())),
            Self::StringConstant { value, .. } => {
                Ok(FragmentAndParameters::new(quote_string(value)))
            }
            Self::Case { expression, .. } => expression.render(ctx),
        }
    }

    /// 选择列表中的渲染：表达式 + 可选的 `as alias`。
    pub fn render_for_select(&self, ctx: &RenderingContext<'_>) -> Result<FragmentAndParameters> {
        let f = self.render(ctx)?;
        Ok(match self.alias() {
            Some(a) => f.map_fragment(|s| format!("{s} as {a}")),
            None => f,
        })
    }
}
