//! Case 表达式：searched（`case when <条件> then ...`）与 simple（`case <列> when <值> then ...`）。

use crate::column::{BasicColumn, quote_string};
use crate::condition::Condition;
use crate::context::RenderingContext;
use crate::criterion::{Criterion, render_criteria};
use crate::error::{RenderError, Result};
use crate::fragment::{FragmentAndParameters, FragmentCollector};
use crate::table::SqlColumn;
use crate::value::SqlValue;

/// `then` / `else` 之后的值。
#[derive(Debug, Clone)]
pub enum CaseValue {
    StringConstant(String),
    Constant(String),
    Value(SqlValue),
    Column(BasicColumn),
}

impl CaseValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::StringConstant(value.into())
    }

    pub fn constant(value: impl Into<String>) -> Self {
        Self::Constant(value.into())
    }

    pub fn value(value: impl Into<SqlValue>) -> Self {
        Self::Value(value.into())
    }

    pub fn column(column: impl Into<BasicColumn>) -> Self {
        Self::Column(column.into())
    }

    fn render(&self, ctx: &RenderingContext<'_>) -> Result<FragmentAndParameters> {
        match self {
            Self::StringConstant(s) => Ok(FragmentAndParameters::new(quote_string(s))),
            Self::Constant(s) => Ok(FragmentAndParameters::new(s.clone())),
            Self::Value(v) => Ok(ctx.bind(None, v.clone())),
            Self::Column(c) => c.render(ctx),
        }
    }
}

/// simple case 的 `when` 分支：等值列表或一个条件（`when > 5`）。
#[derive(Debug, Clone)]
pub enum SimpleWhen {
    Values(Vec<SqlValue>),
    Condition(Condition),
}

impl SimpleWhen {
    fn render(
        &self,
        binding: Option<&SqlColumn>,
        ctx: &RenderingContext<'_>,
    ) -> Result<Option<FragmentAndParameters>> {
        match self {
            Self::Values(values) if values.is_empty() => Ok(None),
            Self::Values(values) => {
                let fc: FragmentCollector =
                    values.iter().map(|v| ctx.bind(binding, v.clone())).collect();
                Ok(Some(fc.join(", ")))
            }
            Self::Condition(c) => c.render_right(binding, ctx),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CaseExpression {
    Searched {
        whens: Vec<(Vec<Criterion>, CaseValue)>,
        else_value: Option<CaseValue>,
    },
    Simple {
        column: BasicColumn,
        whens: Vec<(SimpleWhen, CaseValue)>,
        else_value: Option<CaseValue>,
    },
}

impl CaseExpression {
    /// 没有任何 `when` 分支渲染出来时返回 `EmptyCase`。
    pub(crate) fn render(&self, ctx: &RenderingContext<'_>) -> Result<FragmentAndParameters> {
        let mut fc = FragmentCollector::new();
        let else_value = match self {
            Self::Searched { whens, else_value } => {
                if whens.is_empty() {
                    return Err(RenderError::EmptyCase);
                }
                fc.add_text("case");
                let mut rendered = 0;
                for (criteria, then) in whens {
                    let Some(cond) = render_criteria(criteria, ctx)? else {
                        continue;
                    };
                    fc.add(cond.prepend("when "));
                    fc.add(then.render(ctx)?.prepend("then "));
                    rendered += 1;
                }
                if rendered == 0 {
                    return Err(RenderError::EmptyCase);
                }
                else_value
            }
            Self::Simple {
                column,
                whens,
                else_value,
            } => {
                if whens.is_empty() {
                    return Err(RenderError::EmptyCase);
                }
                fc.add(column.render(ctx)?.prepend("case "));
                let mut rendered = 0;
                for (when, then) in whens {
                    let Some(cond) = when.render(column.binding_column(), ctx)? else {
                        continue;
                    };
                    fc.add(cond.prepend("when "));
                    fc.add(then.render(ctx)?.prepend("then "));
                    rendered += 1;
                }
                if rendered == 0 {
                    return Err(RenderError::EmptyCase);
                }
                else_value
            }
        };
        if let Some(e) = else_value {
            fc.add(e.render(ctx)?.prepend("else "));
        }
        fc.add_text("end");
        Ok(fc.join(" "))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchedCaseBuilder {
    whens: Vec<(Vec<Criterion>, CaseValue)>,
    else_value: Option<CaseValue>,
}

impl SearchedCaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 条件列表按连接词拼接，不加外层括号。
    pub fn when(
        &mut self,
        criteria: impl IntoIterator<Item = Criterion>,
        then: CaseValue,
    ) -> &mut Self {
        self.whens.push((criteria.into_iter().collect(), then));
        self
    }

    pub fn else_(&mut self, value: CaseValue) -> &mut Self {
        self.else_value = Some(value);
        self
    }

    pub fn build(&self) -> CaseExpression {
        CaseExpression::Searched {
            whens: self.whens.clone(),
            else_value: self.else_value.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimpleCaseBuilder {
    column: BasicColumn,
    whens: Vec<(SimpleWhen, CaseValue)>,
    else_value: Option<CaseValue>,
}

impl SimpleCaseBuilder {
    pub fn new(column: impl Into<BasicColumn>) -> Self {
        Self {
            column: column.into(),
            whens: Vec::new(),
            else_value: None,
        }
    }

    pub fn when<T: Into<SqlValue>>(
        &mut self,
        values: impl IntoIterator<Item = T>,
        then: CaseValue,
    ) -> &mut Self {
        let values = values.into_iter().map(Into::into).collect();
        self.whens.push((SimpleWhen::Values(values), then));
        self
    }

    pub fn when_condition(&mut self, condition: Condition, then: CaseValue) -> &mut Self {
        self.whens.push((SimpleWhen::Condition(condition), then));
        self
    }

    pub fn else_(&mut self, value: CaseValue) -> &mut Self {
        self.else_value = Some(value);
        self
    }

    pub fn build(&self) -> CaseExpression {
        CaseExpression::Simple {
            column: self.column.clone(),
            whens: self.whens.clone(),
            else_value: self.else_value.clone(),
        }
    }
}
