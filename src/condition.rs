//! Condition：作用在某一列上的谓词（`= ?`、`between ? and ?`、`in (...)`、`is null` ...）。
//!
//! 条件是不可变值。`*_when_present` 构造函数在值缺失时直接返回 `Condition::Empty`，
//! 渲染器只需要判断 `should_render`，不关心值是否存在。

use crate::column::BasicColumn;
use crate::context::RenderingContext;
use crate::error::Result;
use crate::fragment::{FragmentAndParameters, FragmentCollector};
use crate::select::SelectModel;
use crate::table::SqlColumn;
use crate::value::SqlValue;

#[derive(Debug, Clone)]
pub enum Condition {
    /// 不渲染（值缺失、被过滤或 `when(false)`）。
    Empty,
    NoValue {
        operator: &'static str,
    },
    SingleValue {
        operator: &'static str,
        value: SqlValue,
        case_insensitive: bool,
    },
    TwoValue {
        operator1: &'static str,
        operator2: &'static str,
        value1: SqlValue,
        value2: SqlValue,
    },
    ListValue {
        operator: &'static str,
        values: Vec<SqlValue>,
        case_insensitive: bool,
    },
    ColumnComparison {
        operator: &'static str,
        column: BasicColumn,
    },
    Subselect {
        operator: &'static str,
        select: Box<SelectModel>,
    },
}

fn single(operator: &'static str, value: impl Into<SqlValue>) -> Condition {
    Condition::SingleValue {
        operator,
        value: value.into(),
        case_insensitive: false,
    }
}

fn single_when_present<T: Into<SqlValue>>(operator: &'static str, value: Option<T>) -> Condition {
    match value {
        Some(v) => single(operator, v),
        None => Condition::Empty,
    }
}

fn two(
    operator1: &'static str,
    value1: impl Into<SqlValue>,
    value2: impl Into<SqlValue>,
) -> Condition {
    Condition::TwoValue {
        operator1,
        operator2: "and",
        value1: value1.into(),
        value2: value2.into(),
    }
}

fn list<T: Into<SqlValue>>(
    operator: &'static str,
    values: impl IntoIterator<Item = T>,
    case_insensitive: bool,
) -> Condition {
    let values = values
        .into_iter()
        .map(|v| {
            let v = v.into();
            if case_insensitive { v.to_uppercase() } else { v }
        })
        .collect();
    Condition::ListValue {
        operator,
        values,
        case_insensitive,
    }
}

/// 丢弃 `None` 元素；全部为空时不渲染。
fn list_when_present<T: Into<SqlValue>>(
    operator: &'static str,
    values: impl IntoIterator<Item = Option<T>>,
) -> Condition {
    let values: Vec<SqlValue> = values.into_iter().flatten().map(Into::into).collect();
    if values.is_empty() {
        return Condition::Empty;
    }
    Condition::ListValue {
        operator,
        values,
        case_insensitive: false,
    }
}

fn column_comparison(operator: &'static str, column: impl Into<BasicColumn>) -> Condition {
    Condition::ColumnComparison {
        operator,
        column: column.into(),
    }
}

fn subselect(operator: &'static str, select: SelectModel) -> Condition {
    Condition::Subselect {
        operator,
        select: Box::new(select),
    }
}

pub fn is_null() -> Condition {
    Condition::NoValue {
        operator: "is null",
    }
}

pub fn is_not_null() -> Condition {
    Condition::NoValue {
        operator: "is not null",
    }
}

pub fn is_equal_to(value: impl Into<SqlValue>) -> Condition {
    single("=", value)
}

pub fn is_equal_to_when_present<T: Into<SqlValue>>(value: Option<T>) -> Condition {
    single_when_present("=", value)
}

pub fn is_not_equal_to(value: impl Into<SqlValue>) -> Condition {
    single("<>", value)
}

pub fn is_not_equal_to_when_present<T: Into<SqlValue>>(value: Option<T>) -> Condition {
    single_when_present("<>", value)
}

pub fn is_greater_than(value: impl Into<SqlValue>) -> Condition {
    single(">", value)
}

pub fn is_greater_than_when_present<T: Into<SqlValue>>(value: Option<T>) -> Condition {
    single_when_present(">", value)
}

pub fn is_greater_than_or_equal_to(value: impl Into<SqlValue>) -> Condition {
    single(">=", value)
}

pub fn is_greater_than_or_equal_to_when_present<T: Into<SqlValue>>(
    value: Option<T>,
) -> Condition {
    single_when_present(">=", value)
}

pub fn is_less_than(value: impl Into<SqlValue>) -> Condition {
    single("<", value)
}

pub fn is_less_than_when_present<T: Into<SqlValue>>(value: Option<T>) -> Condition {
    single_when_present("<", value)
}

pub fn is_less_than_or_equal_to(value: impl Into<SqlValue>) -> Condition {
    single("<=", value)
}

pub fn is_less_than_or_equal_to_when_present<T: Into<SqlValue>>(value: Option<T>) -> Condition {
    single_when_present("<=", value)
}

pub fn is_like(value: impl Into<SqlValue>) -> Condition {
    single("like", value)
}

pub fn is_like_when_present<T: Into<SqlValue>>(value: Option<T>) -> Condition {
    single_when_present("like", value)
}

pub fn is_not_like(value: impl Into<SqlValue>) -> Condition {
    single("not like", value)
}

pub fn is_not_like_when_present<T: Into<SqlValue>>(value: Option<T>) -> Condition {
    single_when_present("not like", value)
}

/// `upper(col) like ?`，值在构造时转为大写。
pub fn is_like_case_insensitive(value: impl Into<SqlValue>) -> Condition {
    Condition::SingleValue {
        operator: "like",
        value: value.into().to_uppercase(),
        case_insensitive: true,
    }
}

pub fn is_not_like_case_insensitive(value: impl Into<SqlValue>) -> Condition {
    Condition::SingleValue {
        operator: "not like",
        value: value.into().to_uppercase(),
        case_insensitive: true,
    }
}

pub fn is_between(value1: impl Into<SqlValue>, value2: impl Into<SqlValue>) -> Condition {
    two("between", value1, value2)
}

/// 两个值都存在才渲染。
pub fn is_between_when_present<T: Into<SqlValue>, U: Into<SqlValue>>(
    value1: Option<T>,
    value2: Option<U>,
) -> Condition {
    match (value1, value2) {
        (Some(a), Some(b)) => two("between", a, b),
        _ => Condition::Empty,
    }
}

pub fn is_not_between(value1: impl Into<SqlValue>, value2: impl Into<SqlValue>) -> Condition {
    two("not between", value1, value2)
}

pub fn is_not_between_when_present<T: Into<SqlValue>, U: Into<SqlValue>>(
    value1: Option<T>,
    value2: Option<U>,
) -> Condition {
    match (value1, value2) {
        (Some(a), Some(b)) => two("not between", a, b),
        _ => Condition::Empty,
    }
}

/// 显式传入空列表时渲染为 `in ()`，由调用方负责避免。
pub fn is_in<T: Into<SqlValue>>(values: impl IntoIterator<Item = T>) -> Condition {
    list("in", values, false)
}

pub fn is_in_when_present<T: Into<SqlValue>>(
    values: impl IntoIterator<Item = Option<T>>,
) -> Condition {
    list_when_present("in", values)
}

pub fn is_in_case_insensitive<T: Into<SqlValue>>(values: impl IntoIterator<Item = T>) -> Condition {
    list("in", values, true)
}

pub fn is_not_in<T: Into<SqlValue>>(values: impl IntoIterator<Item = T>) -> Condition {
    list("not in", values, false)
}

pub fn is_not_in_when_present<T: Into<SqlValue>>(
    values: impl IntoIterator<Item = Option<T>>,
) -> Condition {
    list_when_present("not in", values)
}

pub fn is_not_in_case_insensitive<T: Into<SqlValue>>(
    values: impl IntoIterator<Item = T>,
) -> Condition {
    list("not in", values, true)
}

pub fn is_equal_to_column(column: impl Into<BasicColumn>) -> Condition {
    column_comparison("=", column)
}

pub fn is_not_equal_to_column(column: impl Into<BasicColumn>) -> Condition {
    column_comparison("<>", column)
}

pub fn is_greater_than_column(column: impl Into<BasicColumn>) -> Condition {
    column_comparison(">", column)
}

pub fn is_greater_than_or_equal_to_column(column: impl Into<BasicColumn>) -> Condition {
    column_comparison(">=", column)
}

pub fn is_less_than_column(column: impl Into<BasicColumn>) -> Condition {
    column_comparison("<", column)
}

pub fn is_less_than_or_equal_to_column(column: impl Into<BasicColumn>) -> Condition {
    column_comparison("<=", column)
}

pub fn is_in_select(select: SelectModel) -> Condition {
    subselect("in", select)
}

pub fn is_not_in_select(select: SelectModel) -> Condition {
    subselect("not in", select)
}

pub fn is_equal_to_select(select: SelectModel) -> Condition {
    subselect("=", select)
}

pub fn is_not_equal_to_select(select: SelectModel) -> Condition {
    subselect("<>", select)
}

pub fn is_greater_than_select(select: SelectModel) -> Condition {
    subselect(">", select)
}

pub fn is_less_than_select(select: SelectModel) -> Condition {
    subselect("<", select)
}

impl Condition {
    pub fn should_render(&self) -> bool {
        !matches!(self, Self::Empty)
    }

    pub fn is_case_insensitive(&self) -> bool {
        matches!(
            self,
            Self::SingleValue {
                case_insensitive: true,
                ..
            } | Self::ListValue {
                case_insensitive: true,
                ..
            }
        )
    }

    /// 转换每个绑定值；不含绑定值的条件原样返回。
    pub fn map(self, f: impl Fn(SqlValue) -> SqlValue) -> Self {
        match self {
            Self::SingleValue {
                operator,
                value,
                case_insensitive,
            } => Self::SingleValue {
                operator,
                value: f(value),
                case_insensitive,
            },
            Self::TwoValue {
                operator1,
                operator2,
                value1,
                value2,
            } => Self::TwoValue {
                operator1,
                operator2,
                value1: f(value1),
                value2: f(value2),
            },
            Self::ListValue {
                operator,
                values,
                case_insensitive,
            } => Self::ListValue {
                operator,
                values: values.into_iter().map(f).collect(),
                case_insensitive,
            },
            other => other,
        }
    }

    /// 值不满足谓词时变为 `Empty`；列表条件只保留满足谓词的元素，过滤后为空则变为 `Empty`。
    pub fn filter(self, pred: impl Fn(&SqlValue) -> bool) -> Self {
        match self {
            Self::SingleValue { ref value, .. } if !pred(value) => Self::Empty,
            Self::TwoValue {
                ref value1,
                ref value2,
                ..
            } if !(pred(value1) && pred(value2)) => Self::Empty,
            Self::ListValue {
                operator,
                values,
                case_insensitive,
            } => {
                let values: Vec<SqlValue> = values.into_iter().filter(|v| pred(v)).collect();
                if values.is_empty() {
                    Self::Empty
                } else {
                    Self::ListValue {
                        operator,
                        values,
                        case_insensitive,
                    }
                }
            }
            other => other,
        }
    }

    pub fn when(self, render: bool) -> Self {
        if render { self } else { Self::Empty }
    }

    /// 渲染运算符及右侧部分（`= :p1`、`in (:p1,:p2)`、`is null`）。
    ///
    /// `binding` 提供绑定值所用的类型元数据与转换器。
    pub(crate) fn render_right(
        &self,
        binding: Option<&SqlColumn>,
        ctx: &RenderingContext<'_>,
    ) -> Result<Option<FragmentAndParameters>> {
        let f = match self {
            Self::Empty => return Ok(None),
            Self::NoValue { operator } => FragmentAndParameters::new(*operator),
            Self::SingleValue {
                operator, value, ..
            } => ctx.bind(binding, value.clone()).prepend(&format!("{operator} ")),
            Self::TwoValue {
                operator1,
                operator2,
                value1,
                value2,
            } => {
                let first = ctx.bind(binding, value1.clone());
                let second = ctx.bind(binding, value2.clone());
                first
                    .prepend(&format!("{operator1} "))
                    .concat(second.prepend(&format!(" {operator2} ")))
            }
            Self::ListValue {
                operator, values, ..
            } => {
                let fc: FragmentCollector =
                    values.iter().map(|v| ctx.bind(binding, v.clone())).collect();
                fc.join_wrapped(",", "(", ")")
                    .prepend(&format!("{operator} "))
            }
            Self::ColumnComparison { operator, column } => column
                .render(ctx)?
                .prepend(&format!("{operator} ")),
            Self::Subselect { operator, select } => select
                .render_fragment(ctx)?
                .map_fragment(|s| format!("{operator} ({s})")),
        };
        Ok(Some(f))
    }

    /// 渲染完整谓词 `<列> <运算符> <右侧>`；左侧列先渲染，保证参数编号与文本顺序一致。
    pub(crate) fn render(
        &self,
        column: &BasicColumn,
        ctx: &RenderingContext<'_>,
    ) -> Result<Option<FragmentAndParameters>> {
        if !self.should_render() {
            return Ok(None);
        }
        let mut left = column.render(ctx)?;
        if self.is_case_insensitive() {
            left = left.map_fragment(|s| format!("upper({s})"));
        }
        let right = self.render_right(column.binding_column(), ctx)?;
        Ok(right.map(|r| left.concat(r.prepend(" "))))
    }
}
